//! Follow controller parameters
//!
//! # Parameters
//!
//! - `FOLLOW_TARGET` - Distance to hold behind the tag (cm)
//! - `FOLLOW_DEADZONE` - Band above the target where the cart stays put (cm)
//! - `FOLLOW_MIN_DIST` - Hard minimum distance; closer always stops (cm)
//! - `FOLLOW_ENABLE` - Following only starts beyond this distance (cm)
//! - `FOLLOW_ALPHA` - Smoothing coefficient, 1.0 disables filtering
//! - `FOLLOW_TURN_ON` - Angle that starts a turn (deg)
//! - `FOLLOW_TURN_OFF` - Angle below which a turn ends (deg)
//! - `FOLLOW_HOLD_MS` - Minimum time a command is kept before changing

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use super::{float_param, ms_param};

const DEFAULT_TARGET: f32 = 80.0;
const DEFAULT_DEADZONE: f32 = 15.0;
const DEFAULT_MIN_DIST: f32 = 40.0;
const DEFAULT_ENABLE: f32 = 100.0;
const DEFAULT_ALPHA: f32 = 0.1;
const DEFAULT_TURN_ON: f32 = 35.0;
const DEFAULT_TURN_OFF: f32 = 15.0;
const DEFAULT_HOLD_MS: u64 = 300;

const MAX_DISTANCE: f32 = 1000.0;
const MIN_ALPHA: f32 = 0.01;
const MAX_ANGLE: f32 = 90.0;
const MAX_HOLD_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct FollowParams {
    pub target_distance: f32,
    pub deadzone: f32,
    pub min_distance: f32,
    pub enable_distance: f32,
    pub alpha: f32,
    pub turn_on_angle: f32,
    pub turn_off_angle: f32,
    pub hold_ms: u64,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            target_distance: DEFAULT_TARGET,
            deadzone: DEFAULT_DEADZONE,
            min_distance: DEFAULT_MIN_DIST,
            enable_distance: DEFAULT_ENABLE,
            alpha: DEFAULT_ALPHA,
            turn_on_angle: DEFAULT_TURN_ON,
            turn_off_angle: DEFAULT_TURN_OFF,
            hold_ms: DEFAULT_HOLD_MS,
        }
    }
}

impl FollowParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let floats = [
            ("FOLLOW_TARGET", DEFAULT_TARGET),
            ("FOLLOW_DEADZONE", DEFAULT_DEADZONE),
            ("FOLLOW_MIN_DIST", DEFAULT_MIN_DIST),
            ("FOLLOW_ENABLE", DEFAULT_ENABLE),
            ("FOLLOW_ALPHA", DEFAULT_ALPHA),
            ("FOLLOW_TURN_ON", DEFAULT_TURN_ON),
            ("FOLLOW_TURN_OFF", DEFAULT_TURN_OFF),
        ];
        for (name, value) in floats {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }

        store.register(
            "FOLLOW_HOLD_MS",
            ParamValue::Int(DEFAULT_HOLD_MS as i32),
            ParamFlags::empty(),
        )?;

        Ok(())
    }

    /// Load from the store, clamping each value into its valid range
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            target_distance: float_param(store, "FOLLOW_TARGET", DEFAULT_TARGET, 0.0, MAX_DISTANCE),
            deadzone: float_param(store, "FOLLOW_DEADZONE", DEFAULT_DEADZONE, 0.0, MAX_DISTANCE),
            min_distance: float_param(store, "FOLLOW_MIN_DIST", DEFAULT_MIN_DIST, 0.0, MAX_DISTANCE),
            enable_distance: float_param(store, "FOLLOW_ENABLE", DEFAULT_ENABLE, 0.0, MAX_DISTANCE),
            alpha: float_param(store, "FOLLOW_ALPHA", DEFAULT_ALPHA, MIN_ALPHA, 1.0),
            turn_on_angle: float_param(store, "FOLLOW_TURN_ON", DEFAULT_TURN_ON, 0.0, MAX_ANGLE),
            turn_off_angle: float_param(store, "FOLLOW_TURN_OFF", DEFAULT_TURN_OFF, 0.0, MAX_ANGLE),
            hold_ms: ms_param(store, "FOLLOW_HOLD_MS", DEFAULT_HOLD_MS, MAX_HOLD_MS),
        }
    }

    /// Turn-on must exceed turn-off for the hysteresis band to exist
    pub fn is_valid(&self) -> bool {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return false;
        }
        if self.turn_on_angle <= self.turn_off_angle {
            return false;
        }
        self.target_distance >= 0.0 && self.min_distance >= 0.0 && self.enable_distance >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FollowParams::default();
        assert!((params.target_distance - 80.0).abs() < 0.001);
        assert_eq!(params.hold_ms, 300);
        assert!(params.is_valid());
    }

    #[test]
    fn test_from_store_custom() {
        let mut store = ParameterStore::new();
        FollowParams::register_defaults(&mut store).unwrap();
        store.set("FOLLOW_TARGET", ParamValue::Float(120.0)).unwrap();
        store.set("FOLLOW_HOLD_MS", ParamValue::Int(500)).unwrap();

        let params = FollowParams::from_store(&store);
        assert!((params.target_distance - 120.0).abs() < 0.001);
        assert_eq!(params.hold_ms, 500);
    }

    #[test]
    fn test_alpha_clamped() {
        let mut store = ParameterStore::new();
        FollowParams::register_defaults(&mut store).unwrap();
        store.set("FOLLOW_ALPHA", ParamValue::Float(3.0)).unwrap();
        assert!((FollowParams::from_store(&store).alpha - 1.0).abs() < 0.001);
        store.set("FOLLOW_ALPHA", ParamValue::Float(-1.0)).unwrap();
        assert!((FollowParams::from_store(&store).alpha - MIN_ALPHA).abs() < 0.001);
    }

    #[test]
    fn test_missing_entries_fall_back() {
        let store = ParameterStore::new();
        assert_eq!(FollowParams::from_store(&store), FollowParams::default());
    }

    #[test]
    fn test_inverted_hysteresis_invalid() {
        let params = FollowParams {
            turn_on_angle: 10.0,
            turn_off_angle: 20.0,
            ..FollowParams::default()
        };
        assert!(!params.is_valid());
    }
}
