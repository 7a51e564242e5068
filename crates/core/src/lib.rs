//! uwb_follow_core - Pure no_std control logic for a UWB target-following cart
//!
//! This crate contains the platform-agnostic control core: everything that
//! decides what the cart does, with none of the code that talks to
//! hardware. All of it runs on the host in tests.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Explicit time**: state machines take `now_ms` instead of reading a clock
//! - **Trait abstractions**: Motors and peripherals injected via traits
//!
//! # Modules
//!
//! - [`ranging`]: Binary/text ranging decoder and dual-anchor tracker
//! - [`position`]: Dual-anchor triangulation
//! - [`follow`]: Hysteretic bang-bang follow controller
//! - [`path`]: Path recording and reverse replay
//! - [`input`]: Button gestures and single-character commands
//! - [`mode`]: Operating modes and the mode state machine
//! - [`motion`]: Motion commands, motion sink and H-bridge drive
//! - [`parameters`]: Parameter store and parameter groups
//! - [`traits`]: Time abstraction

#![no_std]

pub mod follow;
pub mod input;
pub mod mode;
pub mod motion;
pub mod parameters;
pub mod path;
pub mod position;
pub mod ranging;
pub mod traits;
