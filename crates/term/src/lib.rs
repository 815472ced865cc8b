//! Terminal stand-ins for the matrix and score displays.
//!
//! The LED matrix and the 4-digit readout are drawn as character cells into a
//! [`FrameBuffer`], which [`TerminalRenderer`] flushes to the terminal as a
//! diff against the previous frame. [`TerminalPanel`] ties the two together
//! behind the [`crate::types::hal`] display traits.

pub mod fb;
pub mod matrix_view;
pub mod panel;
pub mod renderer;

pub use matrix_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use matrix_view::{score_digit, MatrixView, PanelSnapshot};
pub use panel::TerminalPanel;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
