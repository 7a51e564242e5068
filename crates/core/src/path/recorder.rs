//! Segment recorder for hand-guided driving

use super::log::{PathLog, PathStep};
use crate::motion::MotionCommand;

/// Default minimum segment length; shorter segments are dropped
pub const DEFAULT_MIN_SEGMENT_MS: u64 = 100;

/// Timestamps action changes and appends completed segments to a log
#[derive(Debug, Clone)]
pub struct PathRecorder {
    recording: bool,
    last_action: MotionCommand,
    last_action_ms: u64,
    min_segment_ms: u64,
    dropped_segments: u32,
}

impl PathRecorder {
    pub fn new(min_segment_ms: u64) -> Self {
        Self {
            recording: false,
            last_action: MotionCommand::Stop,
            last_action_ms: 0,
            min_segment_ms,
            dropped_segments: 0,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Action whose segment is currently open
    pub fn current_action(&self) -> MotionCommand {
        self.last_action
    }

    /// Segments refused because the log was full
    pub fn dropped_segments(&self) -> u32 {
        self.dropped_segments
    }

    /// Clear the log and start timing from a standstill
    pub fn start(&mut self, log: &mut PathLog, now_ms: u64) {
        log.clear();
        self.recording = true;
        self.last_action = MotionCommand::Stop;
        self.last_action_ms = now_ms;
        self.dropped_segments = 0;
    }

    /// Note the action now in effect; returns true if a segment was appended
    pub fn record(&mut self, log: &mut PathLog, action: MotionCommand, now_ms: u64) -> bool {
        if !self.recording || action == self.last_action {
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.last_action_ms);
        let mut appended = false;
        if elapsed > self.min_segment_ms {
            appended = log.push(PathStep::new(self.last_action, elapsed));
            if !appended {
                self.dropped_segments = self.dropped_segments.saturating_add(1);
            }
        }

        self.last_action = action;
        self.last_action_ms = now_ms;
        appended
    }

    /// Close the open segment and stop recording
    pub fn stop(&mut self, log: &mut PathLog, now_ms: u64) {
        if !self.recording {
            return;
        }
        self.record(log, MotionCommand::Stop, now_ms);
        self.recording = false;
        self.last_action = MotionCommand::Stop;
        self.last_action_ms = now_ms;
    }
}

impl Default for PathRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SEGMENT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_recorder_ignores_steps() {
        let mut log = PathLog::with_capacity(10);
        let mut recorder = PathRecorder::default();
        assert!(!recorder.record(&mut log, MotionCommand::Forward, 500));
        assert!(log.is_empty());
    }

    #[test]
    fn test_segments_recorded_on_change() {
        let mut log = PathLog::with_capacity(10);
        let mut recorder = PathRecorder::default();
        recorder.start(&mut log, 0);
        // 200 ms standstill before moving
        assert!(recorder.record(&mut log, MotionCommand::Forward, 200));
        assert!(recorder.record(&mut log, MotionCommand::Left, 700));
        recorder.stop(&mut log, 1000);

        assert_eq!(
            log.steps(),
            &[
                PathStep::new(MotionCommand::Stop, 200),
                PathStep::new(MotionCommand::Forward, 500),
                PathStep::new(MotionCommand::Left, 300),
            ]
        );
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_repeated_action_extends_segment() {
        let mut log = PathLog::with_capacity(10);
        let mut recorder = PathRecorder::default();
        recorder.start(&mut log, 0);
        recorder.record(&mut log, MotionCommand::Forward, 0);
        recorder.record(&mut log, MotionCommand::Forward, 300);
        recorder.stop(&mut log, 600);
        assert_eq!(log.steps(), &[PathStep::new(MotionCommand::Forward, 600)]);
    }

    #[test]
    fn test_short_segment_dropped_not_merged() {
        let mut log = PathLog::with_capacity(10);
        let mut recorder = PathRecorder::default();
        recorder.start(&mut log, 0);
        recorder.record(&mut log, MotionCommand::Forward, 0);
        // Exactly 100 ms is not long enough
        assert!(!recorder.record(&mut log, MotionCommand::Left, 100));
        recorder.record(&mut log, MotionCommand::Forward, 400);
        recorder.stop(&mut log, 900);
        assert_eq!(
            log.steps(),
            &[
                PathStep::new(MotionCommand::Left, 300),
                PathStep::new(MotionCommand::Forward, 500),
            ]
        );
    }

    #[test]
    fn test_full_log_drops_silently() {
        let mut log = PathLog::with_capacity(1);
        let mut recorder = PathRecorder::default();
        recorder.start(&mut log, 0);
        recorder.record(&mut log, MotionCommand::Forward, 0);
        recorder.record(&mut log, MotionCommand::Left, 500);
        recorder.record(&mut log, MotionCommand::Right, 1000);
        assert_eq!(log.len(), 1);
        assert_eq!(recorder.dropped_segments(), 1);
        assert!(recorder.is_recording());
        assert_eq!(recorder.current_action(), MotionCommand::Right);
    }

    #[test]
    fn test_start_clears_previous_log() {
        let mut log = PathLog::with_capacity(10);
        let mut recorder = PathRecorder::default();
        recorder.start(&mut log, 0);
        recorder.record(&mut log, MotionCommand::Forward, 500);
        recorder.stop(&mut log, 1000);
        assert_eq!(log.len(), 2);

        recorder.start(&mut log, 2000);
        assert!(log.is_empty());
    }
}
