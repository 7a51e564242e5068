//! PWM interface trait

use crate::platform::Result;

/// One PWM output channel
pub trait PwmInterface {
    /// Set duty cycle as a fraction [0.0, 1.0]
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidDutyCycle)` when out of range.
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()>;

    fn duty_cycle(&self) -> f32;

    /// Start driving the output
    fn enable(&mut self);

    fn is_enabled(&self) -> bool;
}
