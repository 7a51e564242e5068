//! Cart vehicle implementation
//!
//! Wires the device drivers to the control core.
//!
//! ## Modules
//!
//! - `control`: the cooperative control loop

pub mod control;

pub use control::ControlLoop;
