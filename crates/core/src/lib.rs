//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the LED matrix Tetris: piece geometry,
//! the placed-block grid, collision and landing checks, line clears, scoring
//! and the active piece controller. It has **no dependencies** on displays,
//! buttons or clocks, which makes it:
//!
//! - **Deterministic**: the same entropy sequence replays the same game
//! - **Testable**: every rule is a plain function over explicit state
//! - **Allocation-free**: rows and shapes are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven 4-row tetromino bitmasks and bounding-box rotation
//! - [`grid`]: 37-row playfield with collision queries and row compaction
//! - [`game_state`]: active piece controller and the per-tick state machine
//! - [`rng`]: entropy sources for piece selection
//! - [`scoring`]: `n²` points per landing that clears `n` rows
//!
//! # Example
//!
//! ```
//! use matrix_tetris_core::{GameState, TickOutcome};
//!
//! let mut game = GameState::new(12345);
//! game.move_left();
//! game.try_rotate();
//!
//! // Drop until the piece lands.
//! loop {
//!     match game.tick().expect("grid invariant") {
//!         TickOutcome::Fell => continue,
//!         _ => break,
//!     }
//! }
//! assert!(!game.grid().is_empty());
//! ```

pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use matrix_tetris_types as types;

// Re-export commonly used types for convenience
pub use game_state::{ActivePiece, GameState, Phase, TickOutcome};
pub use grid::{Blocked, ClearedRows, Grid, GridError};
pub use pieces::{shift_row, Piece, SHAPES};
pub use rng::{EntropySource, ShapeSequence, SimpleRng};
pub use scoring::line_clear_points;
