//! Operator input: button gestures and text commands

pub mod command;
pub mod gesture;

pub use command::{Command, HELP_LINES};
pub use gesture::{ButtonGestureClassifier, Gesture};
