//! PWM channel adapter for the H-bridge motors
//!
//! Wraps a platform [`PwmInterface`] output so it can drive one input of an
//! [`HBridgeMotor`](uwb_follow_core::motion::HBridgeMotor).

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::PwmInterface,
};
use uwb_follow_core::motion::{MotorError, PwmPin};

pub struct PwmChannel<P: PwmInterface> {
    pwm: P,
}

impl<P: PwmInterface> PwmChannel<P> {
    /// Enable `pwm` at 0% duty and wrap it
    pub fn new(mut pwm: P) -> Self {
        // A fresh channel at 0% cannot fail the range check.
        let _ = pwm.set_duty_cycle(0.0);
        pwm.enable();
        Self { pwm }
    }

    pub fn inner(&self) -> &P {
        &self.pwm
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pwm
    }
}

impl<P: PwmInterface> PwmPin for PwmChannel<P> {
    fn set_duty(&mut self, duty: f32) -> Result<(), MotorError> {
        self.pwm.set_duty_cycle(duty).map_err(|e| match e {
            PlatformError::Pwm(PwmError::InvalidDutyCycle) => MotorError::InvalidSpeed,
            _ => MotorError::HardwareFault,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPwm;
    use uwb_follow_core::motion::{DifferentialDrive, HBridgeMotor, MotionSink};

    type Channel = PwmChannel<MockPwm>;

    fn motor() -> HBridgeMotor<Channel, Channel> {
        HBridgeMotor::new(PwmChannel::new(MockPwm::new()), PwmChannel::new(MockPwm::new()))
    }

    #[test]
    fn test_new_enables_output() {
        let channel = PwmChannel::new(MockPwm::new());
        assert!(channel.inner().is_enabled());
        assert_eq!(channel.inner().duty_cycle(), 0.0);
    }

    #[test]
    fn test_error_mapping() {
        let mut channel = PwmChannel::new(MockPwm::new());
        assert_eq!(channel.set_duty(1.5), Err(MotorError::InvalidSpeed));

        channel.inner_mut().set_unavailable(true);
        assert_eq!(channel.set_duty(0.5), Err(MotorError::HardwareFault));
    }

    #[test]
    fn test_drive_turn_left_duties() {
        let mut drive = DifferentialDrive::new(motor(), motor(), 0.4, 0.31);
        drive.turn_left();

        let (left, right) = drive.motors();
        let (l1, l2) = left.pins();
        let (r1, r2) = right.pins();
        assert_eq!(l1.inner().duty_cycle(), 0.0);
        assert!((l2.inner().duty_cycle() - 0.31).abs() < 1e-6);
        assert!((r1.inner().duty_cycle() - 0.31).abs() < 1e-6);
        assert_eq!(r2.inner().duty_cycle(), 0.0);
        assert_eq!(drive.last_fault(), None);
    }

    #[test]
    fn test_drive_records_fault_and_keeps_going() {
        let mut broken = PwmChannel::new(MockPwm::new());
        broken.inner_mut().set_unavailable(true);
        let left = HBridgeMotor::new(broken, PwmChannel::new(MockPwm::new()));
        let mut drive = DifferentialDrive::new(left, motor(), 0.4, 0.31);
        drive.forward();
        assert_eq!(drive.last_fault(), Some(MotorError::HardwareFault));

        drive.clear_fault();
        drive.turn_right();
        assert_eq!(drive.last_fault(), Some(MotorError::HardwareFault));
    }
}
