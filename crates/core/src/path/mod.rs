//! Path teaching and return-to-start
//!
//! While the operator drives the cart by hand, [`PathRecorder`] timestamps
//! every change of movement command and appends the finished segment to a
//! [`PathLog`]. [`PathReplayer`] later walks that log backwards with each
//! action inverted. [`TaughtPath`] owns all three and enforces that
//! recording and replay never overlap.

pub mod log;
pub mod recorder;
pub mod replayer;

use core::fmt;

pub use log::{PathLog, PathStep, MAX_PATH_STEPS};
pub use recorder::PathRecorder;
pub use replayer::PathReplayer;

use crate::motion::{MotionCommand, MotionSink};
use crate::parameters::PathParams;

/// Return-to-start could not begin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnError {
    /// Nothing has been recorded
    EmptyPath,
}

impl ReturnError {
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnError::EmptyPath => "No recorded path to return along",
        }
    }
}

impl fmt::Display for ReturnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded path plus its recorder and replayer
#[derive(Debug, Clone)]
pub struct TaughtPath {
    log: PathLog,
    recorder: PathRecorder,
    replayer: PathReplayer,
}

impl TaughtPath {
    pub fn new(params: &PathParams) -> Self {
        Self {
            log: PathLog::with_capacity(params.max_steps),
            recorder: PathRecorder::new(params.min_segment_ms),
            replayer: PathReplayer::new(),
        }
    }

    pub fn log(&self) -> &PathLog {
        &self.log
    }

    pub fn step_count(&self) -> usize {
        self.log.len()
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn is_returning(&self) -> bool {
        self.replayer.is_returning()
    }

    pub fn remaining_steps(&self) -> usize {
        self.replayer.remaining_steps()
    }

    pub fn dropped_segments(&self) -> u32 {
        self.recorder.dropped_segments()
    }

    /// Clear the log and begin recording; cancels any replay
    pub fn start_recording<M: MotionSink + ?Sized>(&mut self, now_ms: u64, motion: &mut M) {
        self.replayer.cancel(motion);
        self.recorder.start(&mut self.log, now_ms);
    }

    /// Note a manual movement command; no-op unless recording
    pub fn record_step(&mut self, action: MotionCommand, now_ms: u64) -> bool {
        self.recorder.record(&mut self.log, action, now_ms)
    }

    /// Flush the open segment and stop recording
    pub fn stop_recording(&mut self, now_ms: u64) {
        self.recorder.stop(&mut self.log, now_ms);
    }

    /// Begin retracing the recorded path from its newest step
    pub fn start_returning<M: MotionSink + ?Sized>(
        &mut self,
        now_ms: u64,
        motion: &mut M,
    ) -> Result<(), ReturnError> {
        if self.log.is_empty() {
            return Err(ReturnError::EmptyPath);
        }
        self.recorder.stop(&mut self.log, now_ms);
        if self.replayer.start(&self.log, now_ms, motion) {
            Ok(())
        } else {
            Err(ReturnError::EmptyPath)
        }
    }

    /// Advance the replay; false once finished (or when not returning)
    pub fn update_returning<M: MotionSink + ?Sized>(&mut self, now_ms: u64, motion: &mut M) -> bool {
        self.replayer.update(&self.log, now_ms, motion)
    }

    pub fn cancel_returning<M: MotionSink + ?Sized>(&mut self, motion: &mut M) {
        self.replayer.cancel(motion);
    }
}

impl Default for TaughtPath {
    fn default() -> Self {
        Self::new(&PathParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RecordingMotion;

    #[test]
    fn test_empty_path_error() {
        let mut path = TaughtPath::default();
        let mut motion = RecordingMotion::new();
        assert_eq!(path.start_returning(0, &mut motion), Err(ReturnError::EmptyPath));
        assert!(!path.is_returning());
    }

    #[test]
    fn test_start_returning_flushes_recording() {
        let mut path = TaughtPath::default();
        let mut motion = RecordingMotion::new();
        path.start_recording(0, &mut motion);
        path.record_step(MotionCommand::Forward, 0);
        path.record_step(MotionCommand::Stop, 400);
        path.record_step(MotionCommand::Backward, 600);

        assert_eq!(path.start_returning(900, &mut motion), Ok(()));
        assert!(!path.is_recording());
        assert_eq!(path.step_count(), 3);
        // Newest step was Backward 300 ms
        assert_eq!(motion.last(), Some(MotionCommand::Forward));
        assert_eq!(path.remaining_steps(), 3);
    }

    #[test]
    fn test_start_recording_cancels_replay() {
        let mut path = TaughtPath::default();
        let mut motion = RecordingMotion::new();
        path.start_recording(0, &mut motion);
        path.record_step(MotionCommand::Forward, 0);
        path.stop_recording(500);
        path.start_returning(600, &mut motion).unwrap();

        path.start_recording(700, &mut motion);
        assert!(!path.is_returning());
        assert!(path.is_recording());
        assert_eq!(path.step_count(), 0);
    }

    #[test]
    fn test_error_display() {
        let mut buf: heapless::String<64> = heapless::String::new();
        core::fmt::write(&mut buf, format_args!("{}", ReturnError::EmptyPath)).unwrap();
        assert_eq!(buf.as_str(), "No recorded path to return along");
    }
}
