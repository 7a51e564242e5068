//! Mock PWM implementation for testing

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::PwmInterface,
    Result,
};

/// Mock PWM implementation
///
/// Tracks duty cycle and enable state for test verification.
#[derive(Debug, Default)]
pub struct MockPwm {
    duty_cycle: f32,
    enabled: bool,
    unavailable: bool,
}

impl MockPwm {
    /// Create a new, disabled mock PWM at 0% duty
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent duty update fail as if the slice were claimed elsewhere
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }
}

impl PwmInterface for MockPwm {
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()> {
        if self.unavailable {
            return Err(PlatformError::Pwm(PwmError::ChannelUnavailable));
        }
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }
        self.duty_cycle = duty_cycle;
        Ok(())
    }

    fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
