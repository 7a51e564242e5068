//! Reverse replay of a recorded path
//!
//! Steps are walked newest to oldest, each executed with the inverse action
//! for its recorded duration, which retraces the taught route back to where
//! recording started.

use super::log::PathLog;
use crate::motion::{MotionCommand, MotionSink};

#[derive(Debug, Clone, Default)]
pub struct PathReplayer {
    current: Option<usize>,
    step_started_ms: u64,
}

impl PathReplayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_returning(&self) -> bool {
        self.current.is_some()
    }

    /// Index of the step being replayed
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Steps left including the one in progress
    pub fn remaining_steps(&self) -> usize {
        self.current.map_or(0, |index| index + 1)
    }

    /// Begin with the newest step; returns false for an empty log
    pub fn start<M: MotionSink + ?Sized>(&mut self, log: &PathLog, now_ms: u64, motion: &mut M) -> bool {
        if log.is_empty() {
            self.current = None;
            return false;
        }
        self.enter(log, log.len() - 1, now_ms, motion);
        true
    }

    /// Advance the replay; returns false once it has finished
    pub fn update<M: MotionSink + ?Sized>(&mut self, log: &PathLog, now_ms: u64, motion: &mut M) -> bool {
        let Some(index) = self.current else {
            return false;
        };
        let Some(step) = log.get(index) else {
            // Log changed under us
            self.finish(motion);
            return false;
        };

        if now_ms.saturating_sub(self.step_started_ms) < step.duration_ms {
            return true;
        }

        if index == 0 {
            self.finish(motion);
            return false;
        }

        self.enter(log, index - 1, now_ms, motion);
        true
    }

    /// Halt mid-step and drop the remaining replay
    pub fn cancel<M: MotionSink + ?Sized>(&mut self, motion: &mut M) {
        if self.current.is_some() {
            self.finish(motion);
        }
    }

    fn enter<M: MotionSink + ?Sized>(&mut self, log: &PathLog, index: usize, now_ms: u64, motion: &mut M) {
        self.current = Some(index);
        self.step_started_ms = now_ms;
        let action = log.get(index).map_or(MotionCommand::Stop, |s| s.action.inverse());
        motion.apply(action);
    }

    fn finish<M: MotionSink + ?Sized>(&mut self, motion: &mut M) {
        self.current = None;
        motion.stop();
    }
}
