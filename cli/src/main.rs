//! `stickshot` CLI: simulated scenario runs, replay import, session stats.

mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sim::replay::{load_replay, save_replay, ReplayLog};
use sim::scenarios::{Scenario, ScenarioKind};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use stick_tracker::tracker::{Tracker, TrackerConfig};

#[derive(Parser)]
#[command(name = "stickshot", about = "IR stick tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a named scenario through the tracker and report what it saw.
    RunScenario {
        #[arg(value_enum)]
        scenario: ScenarioKind,
        /// Random seed for the camera simulator
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Write the tracker's session log to this file
        #[arg(long)]
        session_log: Option<PathBuf>,
        /// Also save the raw frame log for later replay
        #[arg(long)]
        save_replay: Option<PathBuf>,
        /// Output run metrics to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-process a previously recorded raw frame log.
    Replay {
        /// Path to replay JSON file
        input: PathBuf,
        /// Output run metrics to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Aggregate statistics from a recorded session log.
    Stats {
        /// Path to a session log file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::RunScenario {
            scenario,
            seed,
            session_log,
            save_replay: save_path,
            output,
        } => run_scenario(
            scenario,
            seed,
            session_log.as_deref(),
            save_path.as_deref(),
            output.as_deref(),
        ),
        Commands::Replay { input, output } => run_replay(&input, output.as_deref()),
        Commands::Stats { input } => run_stats(&input),
    }
}

/// Feed every recorded frame through the tracker, in arrival order.
fn drive(tracker: &mut Tracker, log: &ReplayLog) {
    for frame in &log.frames {
        tracker.receive(&frame.sources, frame.timestamp);
    }
}

fn run_scenario(
    kind: ScenarioKind,
    seed: u64,
    session_log: Option<&std::path::Path>,
    replay_path: Option<&std::path::Path>,
    output_path: Option<&std::path::Path>,
) -> Result<()> {
    let scenario = Scenario::build(kind);
    let log = sim::record(&scenario, seed);

    println!(
        "Running scenario '{}' (seed={}, {} frames @ {:.0} Hz)...",
        scenario.name,
        seed,
        log.frames.len(),
        log.frame_rate
    );

    let mut tracker = Tracker::new(TrackerConfig::default());
    if let Some(path) = session_log {
        let file = std::fs::File::create(path)?;
        tracker.set_log_sink(Box::new(BufWriter::new(file)), 0.0);
    }

    let start = std::time::Instant::now();
    drive(&mut tracker, &log);
    let session_end = log.frames.last().map(|f| f.timestamp).unwrap_or(0.0);
    tracker.finish_session(session_end);
    let elapsed = start.elapsed();

    println!(
        "Done: {} frames, {} shots, final state {}, elapsed={:.2?}",
        log.frames.len(),
        tracker.shoot_counter(),
        tracker.state(),
        elapsed,
    );

    if let Some(rpath) = replay_path {
        save_replay(&log, rpath)?;
        println!("Replay saved to {}", rpath.display());
    }

    if let Some(opath) = output_path {
        write_metrics(opath, &scenario.name, Some(seed), &tracker, log.frames.len())?;
        println!("Metrics saved to {}", opath.display());
    }

    Ok(())
}

fn run_replay(input: &std::path::Path, output_path: Option<&std::path::Path>) -> Result<()> {
    let log = load_replay(input)?;
    println!(
        "Replaying '{}' ({} frames)...",
        log.scenario_name,
        log.frames.len()
    );

    let mut tracker = Tracker::new(TrackerConfig::default());
    drive(&mut tracker, &log);

    println!(
        "Replay done: {} shots, final state {}",
        tracker.shoot_counter(),
        tracker.state()
    );

    if let Some(opath) = output_path {
        write_metrics(opath, &log.scenario_name, None, &tracker, log.frames.len())?;
    }

    Ok(())
}

fn run_stats(input: &std::path::Path) -> Result<()> {
    let file = std::fs::File::open(input)?;
    let stats = stats::parse_stats(BufReader::new(file))?;
    println!("Session {}:", input.display());
    println!("  shots:           {}", stats.shots);
    println!("  mean shot time:  {:.3} s", stats.mean_shot_secs);
    println!("  calibrations:    {}", stats.calibrations);
    println!("  track losses:    {}", stats.track_losses);
    println!("  session length:  {:.3} s", stats.total_secs);
    Ok(())
}

fn write_metrics(
    path: &std::path::Path,
    scenario: &str,
    seed: Option<u64>,
    tracker: &Tracker,
    frames: usize,
) -> Result<()> {
    let json = serde_json::json!({
        "scenario": scenario,
        "seed": seed,
        "frames": frames,
        "shots": tracker.shoot_counter(),
        "final_state": tracker.state().to_string(),
    });
    std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}
