//! Mock GPIO input for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::GpioInterface,
    Result,
};

/// Input pin whose level the test drives
#[derive(Debug)]
pub struct MockGpio {
    high: bool,
    has_pull_up: bool,
    pull_up: bool,
}

impl MockGpio {
    /// Pin with a pull-up, idling high
    pub fn new() -> Self {
        Self {
            high: true,
            has_pull_up: true,
            pull_up: false,
        }
    }

    /// Pin that cannot be pulled up
    pub fn without_pull_up() -> Self {
        Self {
            has_pull_up: false,
            ..Self::new()
        }
    }

    /// Drive the pin level (for simulating a press or release)
    pub fn set_level(&mut self, high: bool) {
        self.high = high;
    }

    pub fn pull_up_enabled(&self) -> bool {
        self.pull_up
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioInterface for MockGpio {
    fn enable_pull_up(&mut self) -> Result<()> {
        if !self.has_pull_up {
            return Err(PlatformError::Gpio(GpioError::PullUpUnavailable));
        }
        self.pull_up = true;
        Ok(())
    }

    fn read(&self) -> bool {
        self.high
    }
}
