//! Game loop and timing state machine.
//!
//! Drives [`matrix_tetris_core::GameState`] from polled buttons and a clock,
//! and projects it onto a column-addressed LED matrix. All hardware is
//! reached through the traits in [`matrix_tetris_types::hal`], so the same
//! loop runs on a board support package, in the terminal host, or against
//! in-memory fakes in tests.
//!
//! - [`game_loop`]: the per-iteration gravity / input / render cycle
//! - [`triggers`]: edge-triggered and rate-limited button handling
//! - [`render`]: matrix projection and the game over animation
//! - [`config`]: timing configuration with environment overrides
//! - [`clock`]: wall clock and simulated clock

pub mod clock;
pub mod config;
pub mod game_loop;
pub mod render;
pub mod triggers;

pub use matrix_tetris_core as core;
pub use matrix_tetris_types as types;

pub use clock::{ManualClock, SystemClock};
pub use config::LoopConfig;
pub use game_loop::{GameLoop, StepOutcome};
pub use render::{play_closing_animation, project_columns, render_frame, MatrixColumns};
pub use triggers::{EdgeTrigger, RepeatGate};
