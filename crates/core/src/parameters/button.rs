//! Button gesture timing
//!
//! - `BTN_DEBOUNCE_MS` - Presses this soon after an accepted press are ignored
//! - `BTN_DOUBLE_MS` - Window for the second click of a double click
//! - `BTN_LONG_MS` - Hold time for a long press

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use super::ms_param;

const DEFAULT_DEBOUNCE_MS: u64 = 200;
const DEFAULT_DOUBLE_MS: u64 = 400;
const DEFAULT_LONG_MS: u64 = 1000;
const MAX_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonParams {
    pub debounce_ms: u64,
    pub double_click_ms: u64,
    pub long_press_ms: u64,
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            double_click_ms: DEFAULT_DOUBLE_MS,
            long_press_ms: DEFAULT_LONG_MS,
        }
    }
}

impl ButtonParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for (name, value) in [
            ("BTN_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            ("BTN_DOUBLE_MS", DEFAULT_DOUBLE_MS),
            ("BTN_LONG_MS", DEFAULT_LONG_MS),
        ] {
            store.register(name, ParamValue::Int(value as i32), ParamFlags::empty())?;
        }
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            debounce_ms: ms_param(store, "BTN_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS, MAX_MS),
            double_click_ms: ms_param(store, "BTN_DOUBLE_MS", DEFAULT_DOUBLE_MS, MAX_MS),
            long_press_ms: ms_param(store, "BTN_LONG_MS", DEFAULT_LONG_MS, MAX_MS),
        }
    }

    /// A long press must outlast the double-click window
    pub fn is_valid(&self) -> bool {
        self.double_click_ms > 0 && self.long_press_ms > self.double_click_ms
    }
}
