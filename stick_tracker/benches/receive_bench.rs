use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stick_tracker::tracker::{Tracker, TrackerConfig};
use stick_tracker::types::Source;

fn gesture_frame() -> Vec<Option<Source>> {
    vec![
        Some(Source::new(512, 300, 2)),
        Some(Source::new(514, 450, 2)),
        Some(Source::new(510, 600, 2)),
        None,
    ]
}

fn tracking_frame(offset: i32) -> Vec<Option<Source>> {
    vec![
        Some(Source::new(514, 450 + offset, 2)),
        Some(Source::new(510, 600 + offset, 2)),
        None,
        None,
    ]
}

fn bench_receive(c: &mut Criterion) {
    let mut group = c.benchmark_group("receive");

    group.bench_function("tracked_frame", |b| {
        let mut tracker = Tracker::new(TrackerConfig::default());
        tracker.receive(&gesture_frame(), 0.0);
        let frames: Vec<_> = (0..8).map(tracking_frame).collect();
        let mut t = 0.0;
        b.iter(|| {
            for frame in &frames {
                t += 0.01;
                tracker.receive(black_box(frame), t);
            }
        });
    });

    group.bench_function("calibration_gesture", |b| {
        let gesture = gesture_frame();
        b.iter(|| {
            let mut tracker = Tracker::new(TrackerConfig::default());
            tracker.receive(black_box(&gesture), 0.0);
            black_box(tracker.state())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_receive);
criterion_main!(benches);
