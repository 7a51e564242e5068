//! Embassy-backed monotonic clock

use uwb_follow_core::traits::TimeSource;

/// Monotonic clock read from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
