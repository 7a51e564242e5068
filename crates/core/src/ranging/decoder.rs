//! Per-anchor ranging decoder
//!
//! Runs the binary frame parser and the text line accumulator over the same
//! byte stream. A byte consumed by a binary frame in progress never reaches
//! the text path; a byte that aborts a frame (bad length, bad tail) leaves
//! the frame machine idle and is then offered to the text path.

use heapless::Vec;

use super::frame::{FrameEvent, FrameParser};
use super::text::{parse_distance, TextScales};

/// Longest text line kept before a forced flush
pub const LINE_CAPACITY: usize = 200;

/// Default idle flush delay for lines without terminator
pub const DEFAULT_IDLE_FLUSH_MS: u64 = 30;

/// Latest decoded distance for one anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSample {
    /// Distance in centimetres
    pub distance: f32,
    /// Capture time
    pub timestamp_ms: u64,
}

/// Decode counters, useful for diagnosing a noisy link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub frames_decoded: u32,
    pub frames_rejected: u32,
    pub lines_parsed: u32,
    pub lines_discarded: u32,
}

/// Decoder tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Scale factors; `default_scale` also applies to binary distances
    pub scales: TextScales,
    /// A partial line is flushed once idle for strictly longer than this
    pub idle_flush_ms: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            scales: TextScales::default(),
            idle_flush_ms: DEFAULT_IDLE_FLUSH_MS,
        }
    }
}

/// Dual-format decoder owned by exactly one anchor
#[derive(Debug, Clone)]
pub struct RangingFrameDecoder {
    config: DecoderConfig,
    frame: FrameParser,
    line: Vec<u8, LINE_CAPACITY>,
    last_printable_ms: u64,
    latest: Option<RangeSample>,
    stats: DecoderStats,
}

impl RangingFrameDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            frame: FrameParser::new(),
            line: Vec::new(),
            last_printable_ms: 0,
            latest: None,
            stats: DecoderStats::default(),
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Most recent sample, if any was ever decoded
    pub fn latest(&self) -> Option<RangeSample> {
        self.latest
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Bytes currently waiting in the line buffer
    pub fn pending_line(&self) -> &[u8] {
        &self.line
    }

    /// Drop partial frame and line state (samples are kept)
    pub fn reset(&mut self) {
        self.frame.reset();
        self.line.clear();
    }

    /// Feed one byte; returns a distance when this byte produced one
    pub fn feed(&mut self, byte: u8, now_ms: u64) -> Option<f32> {
        match self.frame.push(byte) {
            FrameEvent::Complete(frame) => {
                self.stats.frames_decoded = self.stats.frames_decoded.wrapping_add(1);
                if frame.distance == 0 {
                    return None;
                }
                let distance = frame.distance as f32 * self.config.scales.default_scale;
                self.publish(distance, now_ms)
            }
            FrameEvent::Pending => None,
            FrameEvent::Rejected => {
                self.stats.frames_rejected = self.stats.frames_rejected.wrapping_add(1);
                self.feed_text(byte, now_ms)
            }
            FrameEvent::Idle => self.feed_text(byte, now_ms),
        }
    }

    /// Flush a line left without terminator once the stream went quiet
    pub fn poll_idle(&mut self, now_ms: u64) -> Option<f32> {
        if self.line.is_empty() {
            return None;
        }
        if now_ms.saturating_sub(self.last_printable_ms) > self.config.idle_flush_ms {
            return self.flush_line(now_ms);
        }
        None
    }

    fn feed_text(&mut self, byte: u8, now_ms: u64) -> Option<f32> {
        match byte {
            b'\r' | b'\n' => {
                if self.line.is_empty() {
                    None
                } else {
                    self.flush_line(now_ms)
                }
            }
            0x20..=0x7E => {
                self.last_printable_ms = now_ms;
                // Capacity is checked below, so the push cannot fail
                let _ = self.line.push(byte);
                if self.line.is_full() {
                    self.flush_line(now_ms)
                } else {
                    None
                }
            }
            _ => {
                self.line.clear();
                None
            }
        }
    }

    fn flush_line(&mut self, now_ms: u64) -> Option<f32> {
        let parsed = parse_distance(&self.line, &self.config.scales);
        self.line.clear();
        match parsed {
            Some(distance) => {
                self.stats.lines_parsed = self.stats.lines_parsed.wrapping_add(1);
                self.publish(distance, now_ms)
            }
            None => {
                self.stats.lines_discarded = self.stats.lines_discarded.wrapping_add(1);
                None
            }
        }
    }

    fn publish(&mut self, distance: f32, now_ms: u64) -> Option<f32> {
        self.latest = Some(RangeSample {
            distance,
            timestamp_ms: now_ms,
        });
        Some(distance)
    }
}

impl Default for RangingFrameDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}
