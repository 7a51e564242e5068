//! Path teaching parameters
//!
//! - `PATH_MAX_STEPS` - Steps kept per recording (at most `MAX_PATH_STEPS`)
//! - `PATH_MIN_SEG_MS` - Segments this short or shorter are dropped

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use super::ms_param;
use crate::path::MAX_PATH_STEPS;

const DEFAULT_MAX_STEPS: usize = 100;
const DEFAULT_MIN_SEG_MS: u64 = 100;
const MAX_MIN_SEG_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParams {
    pub max_steps: usize,
    pub min_segment_ms: u64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            min_segment_ms: DEFAULT_MIN_SEG_MS,
        }
    }
}

impl PathParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "PATH_MAX_STEPS",
            ParamValue::Int(DEFAULT_MAX_STEPS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "PATH_MIN_SEG_MS",
            ParamValue::Int(DEFAULT_MIN_SEG_MS as i32),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        let max_steps = match store.get("PATH_MAX_STEPS") {
            Some(ParamValue::Int(v)) => (*v).clamp(1, MAX_PATH_STEPS as i32) as usize,
            Some(ParamValue::Float(v)) => (*v as i32).clamp(1, MAX_PATH_STEPS as i32) as usize,
            _ => DEFAULT_MAX_STEPS,
        };

        Self {
            max_steps,
            min_segment_ms: ms_param(store, "PATH_MIN_SEG_MS", DEFAULT_MIN_SEG_MS, MAX_MIN_SEG_MS),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.max_steps > 0 && self.max_steps <= MAX_PATH_STEPS
    }
}
