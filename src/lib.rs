#![cfg_attr(not(test), no_std)]

//! uwb_follow - Control firmware library for a UWB target-following cart
//!
//! The decision logic lives in `uwb_follow_core`. This crate adds the
//! hardware side: platform traits and host mocks, the drivers that move
//! bytes and pin levels into the core, logging, and the control loop.

// Logging macros (defmt on target, println! in host tests)
pub mod logging;

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Control loop
pub mod rover;

pub use uwb_follow_core as control;
