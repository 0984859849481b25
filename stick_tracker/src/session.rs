//! Session log writer.
//!
//! The tracker appends one line per transition event and one line per
//! tracked frame to a pluggable sink. Timestamps are written relative to the
//! session start so recordings are comparable across runs. The format is
//! line-oriented plain text; the offline statistics tool parses it back.

use std::io::{self, Write};

/// A state-machine transition worth recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Calibrated,
    ShootStarted,
    ShootEnded,
    TrackLost,
}

impl SessionEvent {
    pub fn label(self) -> &'static str {
        match self {
            Self::Calibrated => "calibrated",
            Self::ShootStarted => "shoot-started",
            Self::ShootEnded => "shoot-ended",
            Self::TrackLost => "track-lost",
        }
    }
}

/// Line-oriented session recorder. Owns the sink; the tracker writes through
/// it and never sees the underlying file or buffer.
pub struct SessionLog {
    sink: Box<dyn Write + Send>,
    session_start: f64,
}

impl SessionLog {
    pub fn new(sink: Box<dyn Write + Send>, session_start: f64) -> Self {
        Self {
            sink,
            session_start,
        }
    }

    fn rel(&self, t: f64) -> f64 {
        t - self.session_start
    }

    /// Record a transition event: `<label> [<secs>]`.
    pub fn event(&mut self, event: SessionEvent, t: f64) -> io::Result<()> {
        writeln!(self.sink, "{} [{:.3}]", event.label(), self.rel(t))
    }

    /// Record one frame record (trailing space already included by the
    /// producer): `<x y z ...>[<secs>]`.
    pub fn frame(&mut self, record: &str, t: f64) -> io::Result<()> {
        writeln!(self.sink, "{}[{:.3}]", record, self.rel(t))
    }

    /// Close out the session with a total-duration marker and flush.
    pub fn finish(&mut self, t: f64) -> io::Result<()> {
        writeln!(self.sink, "ended after {:.3}", self.rel(t))?;
        self.sink.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Write adapter letting the test read back what the log wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lines_carry_session_relative_timestamps() {
        let buf = SharedBuf::default();
        let mut log = SessionLog::new(Box::new(buf.clone()), 100.0);
        log.event(SessionEvent::Calibrated, 101.0).unwrap();
        log.frame("360 500 0 360 650 0 ", 101.033).unwrap();
        log.event(SessionEvent::ShootStarted, 102.5).unwrap();
        log.finish(110.0).unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "calibrated [1.000]");
        assert_eq!(lines[1], "360 500 0 360 650 0 [1.033]");
        assert_eq!(lines[2], "shoot-started [2.500]");
        assert_eq!(lines[3], "ended after 10.000");
    }
}
