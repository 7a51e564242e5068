//! Core traits for platform-agnostic control logic.
//!
//! This module provides trait abstractions that decouple the follow,
//! teaching and mode logic from the board that runs it.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Board implementations (Embassy) live in the root crate

pub mod time;

pub use time::{MockTime, TimeSource};
