//! Dual-anchor tracker
//!
//! Owns one decoder per anchor and the position estimator. Bytes are fed
//! per anchor as they are drained from the UARTs; `poll` then flushes idle
//! text lines and recomputes the fix if either anchor produced a sample.

use super::decoder::{DecoderConfig, RangeSample, RangingFrameDecoder};
use crate::position::{EstimatorConfig, PositionEstimator, PositionFix};

/// Default connectivity timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Anchor position on the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Anchor 0, left end of the baseline
    Left,
    /// Anchor 1, right end of the baseline
    Right,
}

impl Anchor {
    pub const ALL: [Anchor; 2] = [Anchor::Left, Anchor::Right];

    pub fn index(self) -> usize {
        match self {
            Anchor::Left => 0,
            Anchor::Right => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Left => "left",
            Anchor::Right => "right",
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    pub decoder: DecoderConfig,
    pub estimator: EstimatorConfig,
    /// Link counts as lost when no sample arrived for this long
    pub timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            estimator: EstimatorConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DualAnchorTracker {
    decoders: [RangingFrameDecoder; 2],
    estimator: PositionEstimator,
    timeout_ms: u64,
    fix: PositionFix,
    last_update_ms: Option<u64>,
    fresh: bool,
}

impl DualAnchorTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            decoders: [
                RangingFrameDecoder::new(config.decoder),
                RangingFrameDecoder::new(config.decoder),
            ],
            estimator: PositionEstimator::new(config.estimator),
            timeout_ms: config.timeout_ms,
            fix: PositionFix::default(),
            last_update_ms: None,
            fresh: false,
        }
    }

    /// Feed one byte received from `anchor`
    pub fn feed(&mut self, anchor: Anchor, byte: u8, now_ms: u64) -> Option<f32> {
        let sample = self.decoders[anchor.index()].feed(byte, now_ms);
        if sample.is_some() {
            self.fresh = true;
        }
        sample
    }

    /// Flush idle lines and re-estimate; returns true when the fix changed
    pub fn poll(&mut self, now_ms: u64) -> bool {
        for decoder in self.decoders.iter_mut() {
            if decoder.poll_idle(now_ms).is_some() {
                self.fresh = true;
            }
        }

        if !self.fresh {
            return false;
        }
        self.fresh = false;

        let d0 = self.distance(Anchor::Left);
        let d1 = self.distance(Anchor::Right);
        self.fix = self.estimator.estimate(d0, d1, now_ms);
        self.last_update_ms = Some(now_ms);
        true
    }

    /// Latest fix; estimation always runs inside `poll`
    pub fn fix(&self) -> PositionFix {
        self.fix
    }

    pub fn sample(&self, anchor: Anchor) -> Option<RangeSample> {
        self.decoders[anchor.index()].latest()
    }

    pub fn decoder(&self, anchor: Anchor) -> &RangingFrameDecoder {
        &self.decoders[anchor.index()]
    }

    pub fn last_update_ms(&self) -> Option<u64> {
        self.last_update_ms
    }

    /// A sample arrived within the timeout window
    pub fn is_connected(&self, now_ms: u64) -> bool {
        match self.last_update_ms {
            Some(last) => now_ms.saturating_sub(last) < self.timeout_ms,
            None => false,
        }
    }

    fn distance(&self, anchor: Anchor) -> f32 {
        self.sample(anchor).map_or(0.0, |s| s.distance)
    }
}

impl Default for DualAnchorTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
