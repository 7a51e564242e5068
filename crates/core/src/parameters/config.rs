//! Aggregate control configuration
//!
//! Loaded once at start-up; the running system never re-reads the store.

use super::error::ParameterError;
use super::storage::ParameterStore;
use super::{ButtonParams, DriveParams, FollowParams, PathParams, RangingParams, SafetyParams};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlConfig {
    pub follow: FollowParams,
    pub ranging: RangingParams,
    pub path: PathParams,
    pub button: ButtonParams,
    pub safety: SafetyParams,
    pub drive: DriveParams,
}

impl ControlConfig {
    /// Register every group's defaults
    pub fn register_all(store: &mut ParameterStore) -> Result<(), ParameterError> {
        FollowParams::register_defaults(store)?;
        RangingParams::register_defaults(store)?;
        PathParams::register_defaults(store)?;
        ButtonParams::register_defaults(store)?;
        SafetyParams::register_defaults(store)?;
        DriveParams::register_defaults(store)?;
        Ok(())
    }

    pub fn load(store: &ParameterStore) -> Self {
        Self {
            follow: FollowParams::from_store(store),
            ranging: RangingParams::from_store(store),
            path: PathParams::from_store(store),
            button: ButtonParams::from_store(store),
            safety: SafetyParams::from_store(store),
            drive: DriveParams::from_store(store),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.follow.is_valid()
            && self.ranging.is_valid()
            && self.path.is_valid()
            && self.button.is_valid()
            && self.safety.is_valid()
            && self.drive.is_valid()
    }
}
