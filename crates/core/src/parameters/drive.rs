//! Drive speed profiles
//!
//! One forward/turn duty pair per group of modes, all fractions of full PWM:
//!
//! - `DRV_FWD_DUTY` / `DRV_TURN_DUTY` - Standby, Carrying and Pulling
//! - `DRV_FOL_FWD` / `DRV_FOL_TURN` - Following
//! - `DRV_PATH_FWD` / `DRV_PATH_TURN` - Teaching and Returning

use super::error::ParameterError;
use super::float_param;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::mode::Mode;
use crate::motion::SpeedProfile;

/// 100/255 forward, 80/255 turn
const DEFAULT_MANUAL: SpeedProfile = SpeedProfile::new(0.4, 0.31);
/// 150/255 forward, 80/255 turn
const DEFAULT_FOLLOW: SpeedProfile = SpeedProfile::new(0.59, 0.31);
/// 204/255 both
const DEFAULT_PATH: SpeedProfile = SpeedProfile::new(0.8, 0.8);

const PROFILE_NAMES: [(&str, &str); 3] = [
    ("DRV_FWD_DUTY", "DRV_TURN_DUTY"),
    ("DRV_FOL_FWD", "DRV_FOL_TURN"),
    ("DRV_PATH_FWD", "DRV_PATH_TURN"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct DriveParams {
    /// Hand-driven and idle modes
    pub manual: SpeedProfile,
    pub follow: SpeedProfile,
    /// Teaching and Returning share one profile so replay retraces the taught distance
    pub path: SpeedProfile,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            manual: DEFAULT_MANUAL,
            follow: DEFAULT_FOLLOW,
            path: DEFAULT_PATH,
        }
    }
}

impl DriveParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = [DEFAULT_MANUAL, DEFAULT_FOLLOW, DEFAULT_PATH];
        for ((fwd, turn), profile) in PROFILE_NAMES.iter().zip(defaults.iter()) {
            store.register(fwd, ParamValue::Float(profile.forward_duty), ParamFlags::empty())?;
            store.register(turn, ParamValue::Float(profile.turn_duty), ParamFlags::empty())?;
        }
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            manual: profile_param(store, PROFILE_NAMES[0], DEFAULT_MANUAL),
            follow: profile_param(store, PROFILE_NAMES[1], DEFAULT_FOLLOW),
            path: profile_param(store, PROFILE_NAMES[2], DEFAULT_PATH),
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.manual, self.follow, self.path].iter().all(|p| {
            (0.0..=1.0).contains(&p.forward_duty) && (0.0..=1.0).contains(&p.turn_duty)
        })
    }

    /// Profile the drive runs with while `mode` is current
    pub fn profile(&self, mode: Mode) -> SpeedProfile {
        match mode {
            Mode::Following => self.follow,
            Mode::Teaching | Mode::Returning => self.path,
            Mode::Standby | Mode::Carrying | Mode::Pulling => self.manual,
        }
    }
}

fn profile_param(store: &ParameterStore, (fwd, turn): (&str, &str), default: SpeedProfile) -> SpeedProfile {
    SpeedProfile::new(
        float_param(store, fwd, default.forward_duty, 0.0, 1.0),
        float_param(store, turn, default.turn_duty, 0.0, 1.0),
    )
}
