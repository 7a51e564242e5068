//! Device drivers
//!
//! Drivers that sit between the platform traits and the control core:
//! they move bytes, pin levels and duty cycles, and leave every decision
//! to `uwb_follow_core`.
//!
//! ## Modules
//!
//! - `uwb`: dual-anchor ranging UART driver
//! - `button`: mode button driver
//! - `motor`: PWM channel adapter for the H-bridge motors

pub mod button;
pub mod motor;
pub mod uwb;

pub use button::ButtonInput;
pub use motor::PwmChannel;
pub use uwb::UwbAnchorPair;
