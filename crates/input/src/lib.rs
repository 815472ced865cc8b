//! Keyboard emulation of the four game buttons.
//!
//! Maps `crossterm` key events onto [`crate::types::Button`]s and exposes the
//! result as a polled [`crate::types::ButtonSource`], the same contract the
//! physical pull-up buttons satisfy. Terminals that never report key release
//! events are handled with a release timeout.

pub mod keyboard;
pub mod map;

pub use matrix_tetris_types as types;

pub use keyboard::KeyboardButtons;
pub use map::{button_for_key, should_quit};
