//! GPIO input trait
//!
//! The mode button is the only GPIO the control loop reads. It is wired
//! active-low against the pin's internal pull-up.

use crate::platform::Result;

/// Digital input pin
///
/// # Safety Invariants
///
/// - Only one owner per GPIO pin instance
/// - No concurrent access to the same GPIO pin from multiple contexts
pub trait GpioInterface {
    /// Enable the internal pull-up so the pin idles high
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::PullUpUnavailable)` if the
    /// pin has no pull-up.
    fn enable_pull_up(&mut self) -> Result<()>;

    /// Returns `true` if the pin is high, `false` if low.
    fn read(&self) -> bool;
}
