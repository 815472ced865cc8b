//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data (plus the hardware boundary traits in
//! [`hal`]) with no external dependencies, so it can be shared by the
//! simulation core, the game loop and the host emulators alike.
//!
//! # Grid Dimensions
//!
//! The playfield is drawn on a 4-segment 8x32 LED matrix. Each grid row is one
//! byte (8 columns) and maps onto one 8-LED column of the matrix:
//!
//! - **Top safe zone**: rows 0-3, hidden spawn buffer
//! - **Visible rows**: rows 4-35 (32 rows, one per matrix column)
//! - **Bottom safe zone**: row 36, never rendered or written
//!
//! Bit 0 of a row is the rightmost column and bit 7 the leftmost one.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Loop poll interval |
//! | `DROP_DELAY_MS` | 500 | Gravity step interval |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Down button re-trigger interval |
//! | `CLOSING_STEP_MS` | 50 | Delay between closing animation frames |
//! | `CLOSING_HOLD_MS` | 100 | Pause between fill and clear phases |
//!
//! # Examples
//!
//! ```
//! use matrix_tetris_types::{PieceKind, GRID_HEIGHT, VISIBLE_BOTTOM, VISIBLE_TOP};
//!
//! assert_eq!(PieceKind::from_index(3), Some(PieceKind::O));
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! assert_eq!(GRID_HEIGHT, 37);
//! assert_eq!(VISIBLE_BOTTOM - VISIBLE_TOP, 32);
//! ```

pub mod hal;

pub use hal::{ButtonSource, Clock, MatrixDisplay, ScoreDisplay};

/// Number of 8x8 segments chained on the LED matrix
pub const MATRIX_SEGMENTS: usize = 4;

/// Number of addressable 8-LED columns on the matrix (32)
pub const MATRIX_WIDTH: usize = MATRIX_SEGMENTS * 8;

/// Number of columns in a grid row (one byte)
pub const GRID_COLUMNS: u8 = 8;

/// Hidden rows above the visible playfield (spawn buffer)
pub const TOP_SAFE_ROWS: usize = 4;

/// Grid row index of the first visible row
pub const VISIBLE_TOP: usize = TOP_SAFE_ROWS;

/// Grid row index just past the last visible row (the bottom safe row)
pub const VISIBLE_BOTTOM: usize = VISIBLE_TOP + MATRIX_WIDTH;

/// Total grid rows: top safe zone + visible rows + one bottom safe row (37)
pub const GRID_HEIGHT: usize = VISIBLE_BOTTOM + 1;

/// A row with every column occupied
pub const FULL_ROW: u8 = 0xFF;

/// Spawn column offset for new pieces
pub const SPAWN_X: i8 = 3;

/// Number of distinct tetromino shapes
pub const SHAPE_COUNT: usize = 7;

/// Loop poll interval in milliseconds
pub const TICK_MS: u32 = 50;

/// Gravity step interval in milliseconds
pub const DROP_DELAY_MS: u32 = 500;

/// Minimum interval between soft drop steps while the down button is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Delay between two frames of the game over animation
pub const CLOSING_STEP_MS: u32 = 50;

/// Pause between the fill and clear halves of the game over animation
pub const CLOSING_HOLD_MS: u32 = 100;

/// Digits on the numeric score display
pub const SCORE_DIGITS: u8 = 4;


/// The seven tetromino piece kinds
///
/// Declaration order is the shape table order used by the entropy source:
/// an index `n` in `0..7` selects `PieceKind::ALL[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    L,
    J,
    I,
    O,
    T,
    Z,
    S,
}

impl PieceKind {
    /// All kinds in shape table order
    pub const ALL: [PieceKind; SHAPE_COUNT] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Kind for a shape table index, `None` if out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Shape table index of this kind
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use matrix_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::S => "s",
        }
    }
}

/// The four physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Down,
    Rotate,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Left, Button::Right, Button::Down, Button::Rotate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Down => "down",
            Button::Rotate => "rotate",
        }
    }
}

/// Sampled level of a button input pin.
///
/// Buttons are wired with pull-up resistors, so a pressed button reads `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinLevel {
    High,
    Low,
}

impl PinLevel {
    /// Active-low: `Low` means the button is held down
    pub fn is_pressed(self) -> bool {
        self == PinLevel::Low
    }

    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }
}
