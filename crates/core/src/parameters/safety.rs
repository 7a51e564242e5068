//! Standby overload warning
//!
//! - `WGT_WARN_G` - Load above which Standby beeps (g)
//! - `WGT_COOLDOWN_MS` - Minimum time between warnings
//! - `WGT_WARN_BEEPS` - Beeps per warning

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use super::{float_param, ms_param};

const DEFAULT_WARN_G: f32 = 1000.0;
const DEFAULT_COOLDOWN_MS: u64 = 3000;
const DEFAULT_BEEPS: u8 = 3;
const MAX_WARN_G: f32 = 50_000.0;
const MAX_COOLDOWN_MS: u64 = 60_000;
const MAX_BEEPS: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SafetyParams {
    pub warn_grams: f32,
    pub cooldown_ms: u64,
    pub warn_beeps: u8,
}

impl Default for SafetyParams {
    fn default() -> Self {
        Self {
            warn_grams: DEFAULT_WARN_G,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            warn_beeps: DEFAULT_BEEPS,
        }
    }
}

impl SafetyParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("WGT_WARN_G", ParamValue::Float(DEFAULT_WARN_G), ParamFlags::empty())?;
        store.register(
            "WGT_COOLDOWN_MS",
            ParamValue::Int(DEFAULT_COOLDOWN_MS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "WGT_WARN_BEEPS",
            ParamValue::Int(DEFAULT_BEEPS as i32),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        let warn_beeps = match store.get("WGT_WARN_BEEPS") {
            Some(ParamValue::Int(v)) => (*v).clamp(1, MAX_BEEPS) as u8,
            _ => DEFAULT_BEEPS,
        };

        Self {
            warn_grams: float_param(store, "WGT_WARN_G", DEFAULT_WARN_G, 0.0, MAX_WARN_G),
            cooldown_ms: ms_param(store, "WGT_COOLDOWN_MS", DEFAULT_COOLDOWN_MS, MAX_COOLDOWN_MS),
            warn_beeps,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.warn_grams > 0.0 && self.warn_beeps > 0
    }
}
