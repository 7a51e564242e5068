//! Binary ranging frame parser
//!
//! Anchors that speak the binary protocol emit fixed 8-byte frames:
//!
//! ```text
//! +------+-----+--------+--------+--------+--------+------+------+
//! | 0xF0 | 0x05| addr_l | addr_h | dist_l | dist_h | rssi | 0xAA |
//! +------+-----+--------+--------+--------+--------+------+------+
//! ```
//!
//! The parser is a byte-at-a-time state machine that never errors: any byte
//! that does not fit the expected position drops the partial frame and the
//! machine resynchronizes on the next header byte.

/// Frame start marker
pub const FRAME_HEADER: u8 = 0xF0;

/// Only accepted payload length
pub const FRAME_PAYLOAD_LEN: usize = 5;

/// Frame end marker
pub const FRAME_TAIL: u8 = 0xAA;

/// Decoded binary frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangingFrame {
    /// Anchor/tag address field
    pub address: u16,
    /// Raw distance in anchor units (little endian on the wire)
    pub distance: u16,
    /// Signal strength indicator
    pub rssi: u8,
}

/// Parser position within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    #[default]
    WaitHeader,
    WaitLength,
    Payload,
    WaitTail,
}

/// Outcome of feeding one byte to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Byte belongs to a frame still in progress
    Pending,
    /// Byte completed a well-formed frame
    Complete(RangingFrame),
    /// Byte aborted a partial frame (bad length or bad tail)
    Rejected,
    /// Parser is idle and the byte was not a header
    Idle,
}

/// Binary frame state machine
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    state: FrameState,
    payload: [u8; FRAME_PAYLOAD_LEN],
    index: usize,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// True when no frame is in progress
    pub fn is_idle(&self) -> bool {
        self.state == FrameState::WaitHeader
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = FrameState::WaitHeader;
        self.index = 0;
    }

    /// Feed one byte
    pub fn push(&mut self, byte: u8) -> FrameEvent {
        match self.state {
            FrameState::WaitHeader => {
                if byte == FRAME_HEADER {
                    self.state = FrameState::WaitLength;
                    FrameEvent::Pending
                } else {
                    FrameEvent::Idle
                }
            }
            FrameState::WaitLength => {
                if byte as usize == FRAME_PAYLOAD_LEN {
                    self.index = 0;
                    self.state = FrameState::Payload;
                    FrameEvent::Pending
                } else {
                    self.reset();
                    FrameEvent::Rejected
                }
            }
            FrameState::Payload => {
                self.payload[self.index] = byte;
                self.index += 1;
                if self.index >= FRAME_PAYLOAD_LEN {
                    self.state = FrameState::WaitTail;
                }
                FrameEvent::Pending
            }
            FrameState::WaitTail => {
                self.reset();
                if byte == FRAME_TAIL {
                    FrameEvent::Complete(RangingFrame {
                        address: u16::from_le_bytes([self.payload[0], self.payload[1]]),
                        distance: u16::from_le_bytes([self.payload[2], self.payload[3]]),
                        rssi: self.payload[4],
                    })
                } else {
                    FrameEvent::Rejected
                }
            }
        }
    }
}
