//! Matrix Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `matrix_tetris::{types,core,engine,input,term}`
//! so the binaries, integration tests and benches share one import path.

pub use matrix_tetris_core as core;
pub use matrix_tetris_engine as engine;
pub use matrix_tetris_input as input;
pub use matrix_tetris_term as term;
pub use matrix_tetris_types as types;
