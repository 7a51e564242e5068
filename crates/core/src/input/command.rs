//! Single-character command channel
//!
//! Commands arrive one byte at a time over any text link (USB serial,
//! Bluetooth serial). Letters are case-insensitive; line terminators and
//! unknown bytes are ignored.

use crate::motion::MotionCommand;

/// Help text written back on request
pub const HELP_LINES: [&str; 2] = [
    "Commands: W/A/S/D/X or F/B/L/R/X for movement",
    "M: mode, T: tare, C: IMU calibrate, P: teach, E: return",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drive directly, in any mode
    Move(MotionCommand),
    /// Advance to the next mode in the cycle
    CycleMode,
    /// Zero the load cell
    Tare,
    /// Calibrate the posture sensor
    Calibrate,
    Help,
    /// Enter Teaching
    Teach,
    /// Enter Returning
    Return,
}

impl Command {
    pub fn parse(byte: u8) -> Option<Self> {
        let command = match byte.to_ascii_lowercase() {
            b'w' | b'f' => Command::Move(MotionCommand::Forward),
            b's' | b'b' => Command::Move(MotionCommand::Backward),
            b'a' | b'l' => Command::Move(MotionCommand::Left),
            b'd' | b'r' => Command::Move(MotionCommand::Right),
            b'x' => Command::Move(MotionCommand::Stop),
            b'm' => Command::CycleMode,
            b't' => Command::Tare,
            b'c' => Command::Calibrate,
            b'?' | b'h' => Command::Help,
            b'p' => Command::Teach,
            b'e' => Command::Return,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Move(motion) => motion.name(),
            Command::CycleMode => "cycle mode",
            Command::Tare => "tare",
            Command::Calibrate => "calibrate",
            Command::Help => "help",
            Command::Teach => "teach",
            Command::Return => "return",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_letters() {
        for (byte, motion) in [
            (b'w', MotionCommand::Forward),
            (b'F', MotionCommand::Forward),
            (b'S', MotionCommand::Backward),
            (b'b', MotionCommand::Backward),
            (b'a', MotionCommand::Left),
            (b'L', MotionCommand::Left),
            (b'd', MotionCommand::Right),
            (b'r', MotionCommand::Right),
            (b'X', MotionCommand::Stop),
        ] {
            assert_eq!(Command::parse(byte), Some(Command::Move(motion)));
        }
    }

    #[test]
    fn test_control_letters() {
        assert_eq!(Command::parse(b'M'), Some(Command::CycleMode));
        assert_eq!(Command::parse(b't'), Some(Command::Tare));
        assert_eq!(Command::parse(b'c'), Some(Command::Calibrate));
        assert_eq!(Command::parse(b'?'), Some(Command::Help));
        assert_eq!(Command::parse(b'H'), Some(Command::Help));
        assert_eq!(Command::parse(b'p'), Some(Command::Teach));
        assert_eq!(Command::parse(b'E'), Some(Command::Return));
    }

    #[test]
    fn test_terminators_and_unknown_ignored() {
        for byte in [b'\r', b'\n', b'z', b'1', b' ', 0x00, 0xFF] {
            assert_eq!(Command::parse(byte), None);
        }
    }
}
