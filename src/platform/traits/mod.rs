//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;
pub mod pwm;
pub mod uart;

pub use gpio::GpioInterface;
pub use pwm::PwmInterface;
pub use uart::UartInterface;
