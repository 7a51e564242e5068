//! Append-only action log

use heapless::Vec;

use crate::motion::MotionCommand;

/// Compile-time ceiling on recorded steps
pub const MAX_PATH_STEPS: usize = 256;

/// One recorded segment: an action held for a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub action: MotionCommand,
    pub duration_ms: u64,
}

impl PathStep {
    pub fn new(action: MotionCommand, duration_ms: u64) -> Self {
        Self {
            action,
            duration_ms,
        }
    }
}

/// Chronological step sequence with a run-time capacity limit.
///
/// Once full, further appends are refused; existing entries are never
/// truncated or replaced.
#[derive(Debug, Clone)]
pub struct PathLog {
    steps: Vec<PathStep, MAX_PATH_STEPS>,
    capacity: usize,
}

impl PathLog {
    /// Create a log holding at most `capacity` steps (capped at `MAX_PATH_STEPS`)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::new(),
            capacity: capacity.min(MAX_PATH_STEPS),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.steps.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&PathStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Total recorded time
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }

    /// Append a step; returns false when the log is full
    pub fn push(&mut self, step: PathStep) -> bool {
        if self.is_full() {
            return false;
        }
        self.steps.push(step).is_ok()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_capped() {
        let log = PathLog::with_capacity(MAX_PATH_STEPS + 10);
        assert_eq!(log.capacity(), MAX_PATH_STEPS);
    }

    #[test]
    fn test_push_refused_when_full() {
        let mut log = PathLog::with_capacity(2);
        assert!(log.push(PathStep::new(MotionCommand::Forward, 500)));
        assert!(log.push(PathStep::new(MotionCommand::Left, 300)));
        assert!(log.is_full());
        assert!(!log.push(PathStep::new(MotionCommand::Right, 200)));
        assert_eq!(log.len(), 2);
        assert_eq!(log.steps()[1].action, MotionCommand::Left);
        assert_eq!(log.total_duration_ms(), 800);
    }
}
