//! Operating modes and the mode state machine
//!
//! Exactly one [`Mode`] is current. [`ModeStateMachine`] owns the follow
//! controller and the taught path, enforces the stop-before-transition rule
//! and runs the per-tick behavior of the current mode against the
//! [`Collaborators`] handed in for that call.

pub mod collaborators;
pub mod machine;
pub mod mock;

pub use collaborators::{
    AlertSink, Collaborators, LightStrip, LoadMonitor, PostureMonitor, PostureWarning,
    StatusDisplay,
};
pub use machine::{ControlStatus, ModeStateMachine, ModeTransition};

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Idle; watches for overload
    #[default]
    Standby,
    /// Worn as a backpack; watches posture
    Carrying,
    /// Follows the tag
    Following,
    /// Pulled by hand; motors held stopped
    Pulling,
    /// Retracing the taught path
    Returning,
    /// Recording manual movement commands
    Teaching,
}

impl Mode {
    /// All modes in cycle order
    pub const ALL: [Mode; 6] = [
        Mode::Standby,
        Mode::Carrying,
        Mode::Following,
        Mode::Pulling,
        Mode::Returning,
        Mode::Teaching,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Standby => "Standby",
            Mode::Carrying => "Carrying",
            Mode::Following => "Following",
            Mode::Pulling => "Pulling",
            Mode::Returning => "Returning",
            Mode::Teaching => "Teaching",
        }
    }

    /// Next mode in the cycle, wrapping Teaching back to Standby
    pub fn next(self) -> Mode {
        match self {
            Mode::Standby => Mode::Carrying,
            Mode::Carrying => Mode::Following,
            Mode::Following => Mode::Pulling,
            Mode::Pulling => Mode::Returning,
            Mode::Returning => Mode::Teaching,
            Mode::Teaching => Mode::Standby,
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
