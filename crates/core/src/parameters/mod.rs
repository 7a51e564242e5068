//! Tuning parameters
//!
//! A [`ParameterStore`] holds named values; each group registers its
//! defaults and loads itself back with every value clamped into range.
//! [`ControlConfig`] bundles all groups.

pub mod button;
pub mod config;
pub mod drive;
pub mod error;
pub mod follow;
pub mod path;
pub mod ranging;
pub mod safety;
pub mod storage;

pub use button::ButtonParams;
pub use config::ControlConfig;
pub use drive::DriveParams;
pub use error::ParameterError;
pub use follow::FollowParams;
pub use path::PathParams;
pub use ranging::RangingParams;
pub use safety::SafetyParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};

/// Numeric parameter clamped to `[min, max]`; default when missing
fn float_param(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) => v.clamp(min, max),
        Some(ParamValue::Int(v)) => (*v as f32).clamp(min, max),
        _ => default,
    }
}

/// Millisecond parameter clamped to `[0, max]`; default when missing
fn ms_param(store: &ParameterStore, name: &str, default: u64, max: u64) -> u64 {
    let value = match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).max(0) as u64,
        Some(ParamValue::Float(v)) => v.max(0.0) as u64,
        _ => return default,
    };
    value.min(max)
}
