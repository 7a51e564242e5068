//! Discrete motion commands and the motion sink capability
//!
//! Motion in this system is strictly bang-bang: every controller decides
//! between five directional intents and hands the decision to a
//! [`MotionSink`]. Speed is a property of the sink (see [`drive`]), never of
//! the decision.
//!
//! # Contents
//!
//! - [`MotionCommand`]: the five directional intents
//! - [`MotionSink`]: the five motion primitives consumed by every controller
//! - [`Drivetrain`]: a motion sink whose speed profile can be switched
//! - [`RecordingMotion`]: sink that records calls for assertions
//! - [`drive`]: H-bridge differential drive implementing `Drivetrain`

pub mod drive;

pub use drive::{DifferentialDrive, HBridgeMotor, Motor, MotorError, PwmPin};

use heapless::Deque;

/// Directional motion intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionCommand {
    #[default]
    Stop,
    Forward,
    Backward,
    Left,
    Right,
}

impl MotionCommand {
    /// Direction that undoes this one (Forward↔Backward, Left↔Right)
    pub fn inverse(self) -> Self {
        match self {
            MotionCommand::Stop => MotionCommand::Stop,
            MotionCommand::Forward => MotionCommand::Backward,
            MotionCommand::Backward => MotionCommand::Forward,
            MotionCommand::Left => MotionCommand::Right,
            MotionCommand::Right => MotionCommand::Left,
        }
    }

    /// True for in-place turns
    pub fn is_turn(self) -> bool {
        matches!(self, MotionCommand::Left | MotionCommand::Right)
    }

    /// Short name for logs and displays
    pub fn name(self) -> &'static str {
        match self {
            MotionCommand::Stop => "Stop",
            MotionCommand::Forward => "Forward",
            MotionCommand::Backward => "Backward",
            MotionCommand::Left => "Left",
            MotionCommand::Right => "Right",
        }
    }
}

/// Motion capability with exactly five primitives.
///
/// One implementation drives the real actuators ([`DifferentialDrive`]),
/// another records calls for tests ([`RecordingMotion`]).
pub trait MotionSink {
    fn forward(&mut self);
    fn backward(&mut self);
    fn turn_left(&mut self);
    fn turn_right(&mut self);
    fn stop(&mut self);

    /// Invoke the single primitive matching `command`
    fn apply(&mut self, command: MotionCommand) {
        match command {
            MotionCommand::Stop => self.stop(),
            MotionCommand::Forward => self.forward(),
            MotionCommand::Backward => self.backward(),
            MotionCommand::Left => self.turn_left(),
            MotionCommand::Right => self.turn_right(),
        }
    }
}

/// Duty fractions used by the motion primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    /// Both sides, forward and backward
    pub forward_duty: f32,
    /// Each side, turning in place
    pub turn_duty: f32,
}

impl SpeedProfile {
    pub const fn new(forward_duty: f32, turn_duty: f32) -> Self {
        Self {
            forward_duty,
            turn_duty,
        }
    }
}

/// Motion sink whose speed profile is chosen per operating mode
///
/// A new profile applies from the next primitive on.
pub trait Drivetrain: MotionSink {
    fn set_profile(&mut self, profile: SpeedProfile);
}

/// Number of calls kept by [`RecordingMotion`]
pub const RECORDED_CALLS: usize = 64;

/// Motion sink that records every primitive invocation.
///
/// Keeps the most recent [`RECORDED_CALLS`] calls; older calls are dropped
/// but still counted in [`RecordingMotion::total_calls`].
#[derive(Debug, Default)]
pub struct RecordingMotion {
    calls: Deque<MotionCommand, RECORDED_CALLS>,
    total: usize,
    profile: Option<SpeedProfile>,
}

impl RecordingMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent primitive, if any was invoked
    pub fn last(&self) -> Option<MotionCommand> {
        self.calls.back().copied()
    }

    /// Recorded primitives, oldest first
    pub fn calls(&self) -> impl Iterator<Item = MotionCommand> + '_ {
        self.calls.iter().copied()
    }

    /// Number of primitives invoked since creation or the last `clear`
    pub fn total_calls(&self) -> usize {
        self.total
    }

    /// Profile most recently selected through [`Drivetrain::set_profile`]
    pub fn profile(&self) -> Option<SpeedProfile> {
        self.profile
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.total = 0;
    }

    fn record(&mut self, command: MotionCommand) {
        if self.calls.is_full() {
            self.calls.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.calls.push_back(command);
        self.total += 1;
    }
}

impl MotionSink for RecordingMotion {
    fn forward(&mut self) {
        self.record(MotionCommand::Forward);
    }

    fn backward(&mut self) {
        self.record(MotionCommand::Backward);
    }

    fn turn_left(&mut self) {
        self.record(MotionCommand::Left);
    }

    fn turn_right(&mut self) {
        self.record(MotionCommand::Right);
    }

    fn stop(&mut self) {
        self.record(MotionCommand::Stop);
    }
}

impl Drivetrain for RecordingMotion {
    fn set_profile(&mut self, profile: SpeedProfile) {
        self.profile = Some(profile);
    }
}
