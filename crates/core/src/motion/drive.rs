//! H-bridge differential drive
//!
//! Two DC motors (left and right side) behind 2-pin H-bridges such as the
//! L298N or DRV8837. The drive turns the five discrete motion primitives into
//! per-side signed duty cycles:
//!
//! | Primitive   | Left motor     | Right motor    |
//! |-------------|----------------|----------------|
//! | forward     | +forward duty  | +forward duty  |
//! | backward    | -forward duty  | -forward duty  |
//! | turn left   | -turn duty     | +turn duty     |
//! | turn right  | +turn duty     | -turn duty     |
//! | stop        | coast          | coast          |
//!
//! # Design
//!
//! Hardware faults never propagate into the controllers: the
//! [`MotionSink`] primitives are infallible, so the drive remembers the most
//! recent [`MotorError`] for the caller to inspect and keeps accepting
//! commands.

use super::{Drivetrain, MotionSink, SpeedProfile};

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Speed value outside [-1.0, +1.0] range
    InvalidSpeed,
    /// Hardware PWM channel unavailable or write failed
    HardwareFault,
}

impl core::fmt::Display for MotorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MotorError::InvalidSpeed => write!(f, "motor speed out of range"),
            MotorError::HardwareFault => write!(f, "motor PWM hardware fault"),
        }
    }
}

/// PWM pin abstraction for motor control
///
/// Platform-specific implementations wrap their HAL's PWM channel.
pub trait PwmPin {
    /// Set PWM duty cycle as a fraction [0.0, 1.0]
    fn set_duty(&mut self, duty: f32) -> Result<(), MotorError>;
}

/// Single DC motor with signed speed
///
/// Speed values are normalized to [-1.0, +1.0]: positive is forward,
/// negative is reverse, zero coasts.
pub trait Motor {
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Coast (both bridge inputs low)
    fn stop(&mut self) -> Result<(), MotorError>;
}

/// Motor behind a 2-pin H-bridge (IN1, IN2)
///
/// | IN1 | IN2 | Motor State |
/// |-----|-----|-------------|
/// | 0   | 0   | Coast       |
/// | PWM | 0   | Forward     |
/// | 0   | PWM | Reverse     |
pub struct HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    in1: IN1,
    in2: IN2,
}

impl<IN1, IN2> HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    pub fn new(in1: IN1, in2: IN2) -> Self {
        Self { in1, in2 }
    }

    /// Pins for inspection
    pub fn pins(&self) -> (&IN1, &IN2) {
        (&self.in1, &self.in2)
    }
}

impl<IN1, IN2> Motor for HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    #[inline]
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(MotorError::InvalidSpeed);
        }

        if speed > 0.0 {
            self.in1.set_duty(speed)?;
            self.in2.set_duty(0.0)?;
        } else if speed < 0.0 {
            self.in1.set_duty(0.0)?;
            self.in2.set_duty(-speed)?;
        } else {
            self.in1.set_duty(0.0)?;
            self.in2.set_duty(0.0)?;
        }
        Ok(())
    }

    #[inline]
    fn stop(&mut self) -> Result<(), MotorError> {
        self.in1.set_duty(0.0)?;
        self.in2.set_duty(0.0)?;
        Ok(())
    }
}

/// Left/right motor pair exposed as a [`MotionSink`]
pub struct DifferentialDrive<L: Motor, R: Motor> {
    left: L,
    right: R,
    forward_duty: f32,
    turn_duty: f32,
    last_fault: Option<MotorError>,
}

impl<L: Motor, R: Motor> DifferentialDrive<L, R> {
    /// Create a drive with duty fractions for straight and turning motion
    ///
    /// Duties are clamped to [0.0, 1.0].
    pub fn new(left: L, right: R, forward_duty: f32, turn_duty: f32) -> Self {
        Self {
            left,
            right,
            forward_duty: forward_duty.clamp(0.0, 1.0),
            turn_duty: turn_duty.clamp(0.0, 1.0),
            last_fault: None,
        }
    }

    /// Change the speed profile; takes effect on the next primitive
    pub fn set_duties(&mut self, forward_duty: f32, turn_duty: f32) {
        self.forward_duty = forward_duty.clamp(0.0, 1.0);
        self.turn_duty = turn_duty.clamp(0.0, 1.0);
    }

    pub fn duties(&self) -> (f32, f32) {
        (self.forward_duty, self.turn_duty)
    }

    /// Most recent hardware fault, if any primitive failed
    pub fn last_fault(&self) -> Option<MotorError> {
        self.last_fault
    }

    pub fn clear_fault(&mut self) {
        self.last_fault = None;
    }

    pub fn motors(&self) -> (&L, &R) {
        (&self.left, &self.right)
    }

    fn drive(&mut self, left: f32, right: f32) {
        let result = self
            .left
            .set_speed(left)
            .and_then(|_| self.right.set_speed(right));
        if let Err(e) = result {
            self.last_fault = Some(e);
        }
    }
}

impl<L: Motor, R: Motor> Drivetrain for DifferentialDrive<L, R> {
    fn set_profile(&mut self, profile: SpeedProfile) {
        self.set_duties(profile.forward_duty, profile.turn_duty);
    }
}

impl<L: Motor, R: Motor> MotionSink for DifferentialDrive<L, R> {
    fn forward(&mut self) {
        self.drive(self.forward_duty, self.forward_duty);
    }

    fn backward(&mut self) {
        self.drive(-self.forward_duty, -self.forward_duty);
    }

    fn turn_left(&mut self) {
        self.drive(-self.turn_duty, self.turn_duty);
    }

    fn turn_right(&mut self) {
        self.drive(self.turn_duty, -self.turn_duty);
    }

    fn stop(&mut self) {
        // Stop both sides even if the first one faults
        let left = self.left.stop();
        let right = self.right.stop();
        if let Err(e) = left.and(right) {
            self.last_fault = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM pin for testing (no hardware dependencies)
    #[derive(Debug)]
    struct MockPwmPin {
        duty: f32,
        fail: bool,
    }

    impl MockPwmPin {
        fn new() -> Self {
            Self {
                duty: 0.0,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                duty: 0.0,
                fail: true,
            }
        }
    }

    impl PwmPin for MockPwmPin {
        fn set_duty(&mut self, duty: f32) -> Result<(), MotorError> {
            if self.fail {
                return Err(MotorError::HardwareFault);
            }
            self.duty = duty;
            Ok(())
        }
    }

    type TestMotor = HBridgeMotor<MockPwmPin, MockPwmPin>;

    fn motor() -> TestMotor {
        HBridgeMotor::new(MockPwmPin::new(), MockPwmPin::new())
    }

    fn duties(m: &TestMotor) -> (f32, f32) {
        let (in1, in2) = m.pins();
        (in1.duty, in2.duty)
    }

    #[test]
    fn test_hbridge_forward_reverse_coast() {
        let mut m = motor();
        m.set_speed(0.75).unwrap();
        assert_eq!(duties(&m), (0.75, 0.0));

        m.set_speed(-0.5).unwrap();
        assert_eq!(duties(&m), (0.0, 0.5));

        m.set_speed(0.0).unwrap();
        assert_eq!(duties(&m), (0.0, 0.0));
    }

    #[test]
    fn test_hbridge_invalid_speed() {
        let mut m = motor();
        assert_eq!(m.set_speed(1.5), Err(MotorError::InvalidSpeed));
        assert_eq!(m.set_speed(-2.0), Err(MotorError::InvalidSpeed));
    }

    #[test]
    fn test_drive_primitives() {
        let mut drive = DifferentialDrive::new(motor(), motor(), 0.4, 0.3);

        drive.forward();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.4, 0.0));
        assert_eq!(duties(r), (0.4, 0.0));

        drive.backward();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.0, 0.4));
        assert_eq!(duties(r), (0.0, 0.4));

        drive.turn_left();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.0, 0.3));
        assert_eq!(duties(r), (0.3, 0.0));

        drive.turn_right();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.3, 0.0));
        assert_eq!(duties(r), (0.0, 0.3));

        drive.stop();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.0, 0.0));
        assert_eq!(duties(r), (0.0, 0.0));
        assert_eq!(drive.last_fault(), None);
    }

    #[test]
    fn test_drive_duties_clamped() {
        let mut drive = DifferentialDrive::new(motor(), motor(), 1.5, -0.2);
        assert_eq!(drive.duties(), (1.0, 0.0));
        drive.set_duties(0.8, 0.8);
        assert_eq!(drive.duties(), (0.8, 0.8));
    }

    #[test]
    fn test_profile_applies_to_next_primitive() {
        let mut drive = DifferentialDrive::new(motor(), motor(), 0.4, 0.3);
        drive.forward();
        drive.set_profile(SpeedProfile::new(0.8, 0.5));
        let (l, _) = drive.motors();
        assert_eq!(duties(l), (0.4, 0.0));

        drive.forward();
        let (l, r) = drive.motors();
        assert_eq!(duties(l), (0.8, 0.0));
        assert_eq!(duties(r), (0.8, 0.0));
        assert_eq!(drive.duties(), (0.8, 0.5));
    }

    #[test]
    fn test_drive_records_fault_and_keeps_running() {
        let failing = HBridgeMotor::new(MockPwmPin::failing(), MockPwmPin::new());
        let mut drive = DifferentialDrive::new(failing, motor(), 0.4, 0.3);

        drive.forward();
        assert_eq!(drive.last_fault(), Some(MotorError::HardwareFault));

        // Right side still coasts on stop even though the left side faults
        drive.stop();
        let (_, r) = drive.motors();
        assert_eq!(duties(r), (0.0, 0.0));

        drive.clear_fault();
        assert_eq!(drive.last_fault(), None);
    }
}
