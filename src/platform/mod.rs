//! Platform abstraction layer
//!
//! Hardware access for the control loop goes through the traits in this
//! module. Board bring-up lives in the firmware binary, which hands the
//! loop objects implementing these traits.

pub mod error;
pub mod traits;

#[cfg(feature = "pico2_w")]
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, PwmInterface, UartInterface};
