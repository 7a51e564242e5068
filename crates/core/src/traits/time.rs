//! Time abstraction for the cooperative control loop.
//!
//! Every timer in the system (command hold, path segments, gesture windows,
//! ranging timeouts) is an elapsed-time comparison against a monotonic
//! millisecond clock. The `TimeSource` trait hides where that clock comes
//! from so the loop can run against a controllable clock on the host.

use core::cell::Cell;

/// Monotonic millisecond clock.
///
/// # Example
///
/// ```
/// use uwb_follow_core::traits::{MockTime, TimeSource};
///
/// fn due<T: TimeSource>(time: &T, last_ms: u64, period_ms: u64) -> bool {
///     time.elapsed_since(last_ms) >= period_ms
/// }
///
/// let time = MockTime::new();
/// time.advance(250);
/// assert!(due(&time, 0, 200));
/// ```
pub trait TimeSource {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns elapsed milliseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference "in the future" yields 0.
    fn elapsed_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Mock time source with manual advancement.
///
/// Interior mutability lets a test hold a shared reference to the clock
/// while the code under test also reads it.
#[derive(Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}

impl<T: TimeSource> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_initial_value() {
        let time = MockTime::new();
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(5_000);
        assert_eq!(time.now_ms(), 5_000);
    }

    #[test]
    fn mock_time_set_and_advance() {
        let time = MockTime::new();
        time.set(1_000);
        time.advance(250);
        assert_eq!(time.now_ms(), 1_250);
    }

    #[test]
    fn mock_time_elapsed_since() {
        let time = MockTime::with_initial(10_000);
        assert_eq!(time.elapsed_since(3_000), 7_000);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::with_initial(1_000);
        assert_eq!(time.elapsed_since(5_000), 0);
    }

    #[test]
    fn borrowed_time_source_reads_through() {
        let time = MockTime::with_initial(42);
        let borrowed = &time;
        assert_eq!(borrowed.now_ms(), 42);
    }
}
