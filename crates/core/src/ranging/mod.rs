//! Dual-anchor ranging
//!
//! Bytes from each anchor UART go through a [`RangingFrameDecoder`] that
//! understands both the binary frame protocol and free-form text lines.
//! [`DualAnchorTracker`] owns both decoders plus the position estimator and
//! publishes the latest fix.

pub mod decoder;
pub mod frame;
pub mod text;
pub mod tracker;

pub use decoder::{DecoderConfig, DecoderStats, RangeSample, RangingFrameDecoder, LINE_CAPACITY};
pub use frame::{FrameEvent, FrameParser, FrameState, RangingFrame};
pub use text::{parse_distance, TextScales};
pub use tracker::{Anchor, DualAnchorTracker, TrackerConfig};
