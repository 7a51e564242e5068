//! Peripherals the mode state machine talks to
//!
//! Display rendering, buzzer patterns, LED effects, load-cell sampling and
//! posture estimation live outside the core. The state machine only sees
//! these narrow traits.

use super::Mode;
use crate::motion::Drivetrain;

/// Buzzer or other audible alert
pub trait AlertSink {
    /// Start a continuous alert (idempotent)
    fn start_alert(&mut self);
    /// Silence any alert or pattern in progress
    fn stop_alert(&mut self);
    /// Play `count` short beeps
    fn beep_pattern(&mut self, count: u8);
    /// A pattern or alert is still playing
    fn is_busy(&self) -> bool;
}

/// Posture classification from the inertial sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostureWarning {
    #[default]
    Ok,
    BentForward,
    BentBackward,
    ShoulderLeft,
    ShoulderRight,
}

impl PostureWarning {
    pub fn is_ok(self) -> bool {
        self == PostureWarning::Ok
    }

    /// Text for the status screen; empty when posture is fine
    pub fn text(self) -> &'static str {
        match self {
            PostureWarning::Ok => "",
            PostureWarning::BentForward => "!! Bent Forward !!",
            PostureWarning::BentBackward => "!! Leaning Back !!",
            PostureWarning::ShoulderLeft => "!! Left Shoulder !!",
            PostureWarning::ShoulderRight => "!! Right Shoulder !!",
        }
    }
}

pub trait PostureMonitor {
    fn check_posture(&mut self) -> PostureWarning;
    /// Blocking, bounded calibration; never called from the periodic tick
    fn calibrate(&mut self);
}

pub trait LoadMonitor {
    /// Latest weight reading in grams
    fn weight_grams(&mut self) -> f32;
    /// Blocking, bounded zeroing; never called from the periodic tick
    fn tare(&mut self);
}

pub trait StatusDisplay {
    fn show_mode(&mut self, mode: Mode);
}

pub trait LightStrip {
    fn toggle(&mut self);
}

/// Handles lent to the state machine for one call
pub struct Collaborators<'a> {
    pub motion: &'a mut dyn Drivetrain,
    pub alert: &'a mut dyn AlertSink,
    pub posture: &'a mut dyn PostureMonitor,
    pub load: &'a mut dyn LoadMonitor,
    pub display: &'a mut dyn StatusDisplay,
    pub lights: &'a mut dyn LightStrip,
}
