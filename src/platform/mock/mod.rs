//! Mock platform implementation for testing
//!
//! In-memory stand-ins for the platform traits so the control loop can be
//! exercised without hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

mod gpio;
mod pwm;
mod uart;

pub use gpio::MockGpio;
pub use pwm::MockPwm;
pub use uart::MockUart;
