//! Host-side collaborator doubles
//!
//! Always compiled so both unit tests and the scenario tests under `tests/`
//! can drive the state machine.

use super::collaborators::{
    AlertSink, LightStrip, LoadMonitor, PostureMonitor, PostureWarning, StatusDisplay,
};
use super::Mode;

/// Alert sink that records what it was asked to do
#[derive(Debug, Default)]
pub struct MockAlert {
    pub alerting: bool,
    pub busy: bool,
    pub patterns: u32,
    pub last_pattern: Option<u8>,
    pub stops: u32,
}

impl AlertSink for MockAlert {
    fn start_alert(&mut self) {
        self.alerting = true;
    }

    fn stop_alert(&mut self) {
        self.alerting = false;
        self.busy = false;
        self.stops += 1;
    }

    fn beep_pattern(&mut self, count: u8) {
        self.patterns += 1;
        self.last_pattern = Some(count);
    }

    fn is_busy(&self) -> bool {
        self.busy || self.alerting
    }
}

/// Posture monitor returning a settable warning
#[derive(Debug, Default)]
pub struct MockPosture {
    pub warning: PostureWarning,
    pub calibrations: u32,
}

impl PostureMonitor for MockPosture {
    fn check_posture(&mut self) -> PostureWarning {
        self.warning
    }

    fn calibrate(&mut self) {
        self.calibrations += 1;
    }
}

/// Load monitor returning a settable weight
#[derive(Debug, Default)]
pub struct MockLoad {
    pub grams: f32,
    pub tares: u32,
}

impl LoadMonitor for MockLoad {
    fn weight_grams(&mut self) -> f32 {
        self.grams
    }

    fn tare(&mut self) {
        self.grams = 0.0;
        self.tares += 1;
    }
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub shown: Option<Mode>,
    pub updates: u32,
}

impl StatusDisplay for MockDisplay {
    fn show_mode(&mut self, mode: Mode) {
        self.shown = Some(mode);
        self.updates += 1;
    }
}

#[derive(Debug, Default)]
pub struct MockLights {
    pub on: bool,
    pub toggles: u32,
}

impl LightStrip for MockLights {
    fn toggle(&mut self) {
        self.on = !self.on;
        self.toggles += 1;
    }
}
