//! Dual-anchor UWB ranging driver
//!
//! Each anchor module reports its distance to the tag over its own UART,
//! either as binary frames or as text lines. This driver drains both
//! UARTs without blocking and hands every byte to a
//! [`DualAnchorTracker`], which decodes, resynchronizes and triangulates.
//!
//! # Example
//!
//! ```ignore
//! use uwb_follow::devices::UwbAnchorPair;
//! use uwb_follow::platform::mock::MockUart;
//! use uwb_follow_core::ranging::TrackerConfig;
//!
//! let mut anchors = UwbAnchorPair::new(
//!     MockUart::new(),
//!     MockUart::new(),
//!     TrackerConfig::default(),
//! );
//! anchors.left_mut().inject_rx_data(b"D: 100\n");
//! anchors.right_mut().inject_rx_data(b"D: 100\n");
//! assert!(anchors.poll(10));
//! assert!(anchors.tracker().fix().valid);
//! ```

use crate::platform::traits::UartInterface;
use uwb_follow_core::ranging::{Anchor, DualAnchorTracker, TrackerConfig};

/// Bytes pulled from a UART per read call
const READ_CHUNK: usize = 64;

/// The two anchor UARTs and the tracker they feed
pub struct UwbAnchorPair<U0, U1>
where
    U0: UartInterface,
    U1: UartInterface,
{
    left: U0,
    right: U1,
    tracker: DualAnchorTracker,
    read_errors: u32,
}

impl<U0, U1> UwbAnchorPair<U0, U1>
where
    U0: UartInterface,
    U1: UartInterface,
{
    /// Create the driver
    ///
    /// # Arguments
    ///
    /// * `left` - UART of the left anchor (d0)
    /// * `right` - UART of the right anchor (d1)
    /// * `config` - Decoder, estimator and timeout settings
    pub fn new(left: U0, right: U1, config: TrackerConfig) -> Self {
        Self {
            left,
            right,
            tracker: DualAnchorTracker::new(config),
            read_errors: 0,
        }
    }

    /// Drain both anchors and re-estimate the fix
    ///
    /// Returns true when a new fix was computed in this call.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let failed = drain(&mut self.left, Anchor::Left, &mut self.tracker, now_ms)
            + drain(&mut self.right, Anchor::Right, &mut self.tracker, now_ms);
        self.read_errors = self.read_errors.wrapping_add(failed);

        let updated = self.tracker.poll(now_ms);
        if updated {
            let fix = self.tracker.fix();
            crate::log_trace!(
                "UWB fix: dist={} angle={} valid={}",
                fix.distance,
                fix.angle,
                fix.valid
            );
        }
        updated
    }

    pub fn tracker(&self) -> &DualAnchorTracker {
        &self.tracker
    }

    pub fn is_connected(&self, now_ms: u64) -> bool {
        self.tracker.is_connected(now_ms)
    }

    /// UART reads that failed since start
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn left_mut(&mut self) -> &mut U0 {
        &mut self.left
    }

    pub fn right_mut(&mut self) -> &mut U1 {
        &mut self.right
    }
}

/// Read everything `uart` has buffered into the tracker.
///
/// A failed read ends the drain for this anchor until the next poll.
/// Returns the number of failed reads (0 or 1).
fn drain<U: UartInterface>(
    uart: &mut U,
    anchor: Anchor,
    tracker: &mut DualAnchorTracker,
    now_ms: u64,
) -> u32 {
    let mut buf = [0u8; READ_CHUNK];
    let mut failed = 0;
    let discarded_before = tracker.decoder(anchor).stats().lines_discarded;

    while uart.available() {
        let count = match uart.read(&mut buf) {
            Ok(0) => break,
            Ok(count) => count,
            Err(e) => {
                failed = 1;
                crate::log_warn!("UWB {} read failed: {}", anchor.name(), e);
                break;
            }
        };
        for &byte in &buf[..count] {
            tracker.feed(anchor, byte, now_ms);
        }
    }

    let discarded = tracker
        .decoder(anchor)
        .stats()
        .lines_discarded
        .wrapping_sub(discarded_before);
    if discarded > 0 {
        crate::log_debug!("UWB {}: {} undecodable line(s)", anchor.name(), discarded);
    }
    failed
}
