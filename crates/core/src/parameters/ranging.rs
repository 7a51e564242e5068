//! Ranging and triangulation parameters
//!
//! # Parameters
//!
//! - `UWB_BASELINE` - Distance between the two anchors (cm)
//! - `UWB_DIST_SCALE` - Multiplier for unit-less and binary distances
//! - `UWB_HEX_SCALE` - Multiplier for hexadecimal distances
//! - `UWB_ANG_INVERT` - Negate the computed angle (mirrored mounting)
//! - `UWB_ANG_OFFSET` - Fixed angle correction (deg)
//! - `UWB_TIMEOUT_MS` - Link lost after this long without samples
//! - `UWB_IDLE_MS` - Flush an unterminated text line after this much silence

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use super::{float_param, ms_param};
use crate::position::EstimatorConfig;
use crate::ranging::{DecoderConfig, TextScales, TrackerConfig};

const DEFAULT_BASELINE: f32 = 28.0;
const DEFAULT_DIST_SCALE: f32 = 1.0;
const DEFAULT_HEX_SCALE: f32 = 0.1;
const DEFAULT_ANG_INVERT: bool = true;
const DEFAULT_ANG_OFFSET: f32 = 0.0;
const DEFAULT_TIMEOUT_MS: u64 = 2000;
const DEFAULT_IDLE_MS: u64 = 30;

const MIN_BASELINE: f32 = 1.0;
const MAX_BASELINE: f32 = 500.0;
const MAX_SCALE: f32 = 1000.0;
const MAX_OFFSET: f32 = 180.0;
const MAX_TIMEOUT_MS: u64 = 60_000;
const MAX_IDLE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct RangingParams {
    pub baseline: f32,
    pub distance_scale: f32,
    pub hex_scale: f32,
    pub invert_angle: bool,
    pub angle_offset: f32,
    pub timeout_ms: u64,
    pub idle_flush_ms: u64,
}

impl Default for RangingParams {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE,
            distance_scale: DEFAULT_DIST_SCALE,
            hex_scale: DEFAULT_HEX_SCALE,
            invert_angle: DEFAULT_ANG_INVERT,
            angle_offset: DEFAULT_ANG_OFFSET,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            idle_flush_ms: DEFAULT_IDLE_MS,
        }
    }
}

impl RangingParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("UWB_BASELINE", ParamValue::Float(DEFAULT_BASELINE), ParamFlags::empty())?;
        store.register("UWB_DIST_SCALE", ParamValue::Float(DEFAULT_DIST_SCALE), ParamFlags::empty())?;
        store.register("UWB_HEX_SCALE", ParamValue::Float(DEFAULT_HEX_SCALE), ParamFlags::empty())?;
        store.register("UWB_ANG_INVERT", ParamValue::Bool(DEFAULT_ANG_INVERT), ParamFlags::empty())?;
        store.register("UWB_ANG_OFFSET", ParamValue::Float(DEFAULT_ANG_OFFSET), ParamFlags::empty())?;
        store.register(
            "UWB_TIMEOUT_MS",
            ParamValue::Int(DEFAULT_TIMEOUT_MS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "UWB_IDLE_MS",
            ParamValue::Int(DEFAULT_IDLE_MS as i32),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            baseline: float_param(store, "UWB_BASELINE", DEFAULT_BASELINE, MIN_BASELINE, MAX_BASELINE),
            distance_scale: float_param(store, "UWB_DIST_SCALE", DEFAULT_DIST_SCALE, 0.0, MAX_SCALE),
            hex_scale: float_param(store, "UWB_HEX_SCALE", DEFAULT_HEX_SCALE, 0.0, MAX_SCALE),
            invert_angle: store.get_bool("UWB_ANG_INVERT").unwrap_or(DEFAULT_ANG_INVERT),
            angle_offset: float_param(store, "UWB_ANG_OFFSET", DEFAULT_ANG_OFFSET, -MAX_OFFSET, MAX_OFFSET),
            timeout_ms: ms_param(store, "UWB_TIMEOUT_MS", DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS),
            idle_flush_ms: ms_param(store, "UWB_IDLE_MS", DEFAULT_IDLE_MS, MAX_IDLE_MS),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.baseline > 0.0 && self.distance_scale > 0.0 && self.hex_scale > 0.0 && self.timeout_ms > 0
    }

    /// Decoder, estimator and timeout settings for the anchor tracker
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            decoder: DecoderConfig {
                scales: TextScales {
                    default_scale: self.distance_scale,
                    hex_scale: self.hex_scale,
                },
                idle_flush_ms: self.idle_flush_ms,
            },
            estimator: EstimatorConfig {
                baseline: self.baseline,
                invert_angle: self.invert_angle,
                angle_offset: self.angle_offset,
            },
            timeout_ms: self.timeout_ms,
        }
    }
}
