//! Grid module - the placed-block playfield
//!
//! The grid is 37 rows of one byte each: 4 hidden spawn rows, the 32 rows
//! shown on the LED matrix and a hidden bottom guard row. Row 0 is the top.
//! A set bit means the cell is permanently occupied.
//!
//! All queries take a [`Piece`] together with its `(x, y)` placement, where
//! `y` is the grid row of the piece's top row.

use std::fmt;

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{FULL_ROW, GRID_COLUMNS, GRID_HEIGHT, VISIBLE_BOTTOM, VISIBLE_TOP};

/// Row indices removed by one [`Grid::clear_full_rows`] call, top to bottom
pub type ClearedRows = ArrayVec<usize, GRID_HEIGHT>;

/// Why a horizontal placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    RightWall,
    LeftWall,
    /// Rows would reach below the last visible row (rotation next to the floor)
    Floor,
    Occupied,
}

impl Blocked {
    pub fn message(self) -> &'static str {
        match self {
            Blocked::RightWall => "block hit right wall",
            Blocked::LeftWall => "block hit left wall",
            Blocked::Floor => "block hit floor",
            Blocked::Occupied => "block hit existing block",
        }
    }
}

/// Grid invariant violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A commit would write rows `top..=feet` outside the grid
    OutOfBounds { top: i8, feet: i8 },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "commit_out_of_bounds",
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { top, feet } => write!(
                f,
                "piece rows {top}..={feet} fall outside the {GRID_HEIGHT}-row grid"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// The playfield: one byte per row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [u8; GRID_HEIGHT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [0; GRID_HEIGHT],
        }
    }

    #[inline(always)]
    fn index(y: i8) -> Option<usize> {
        usize::try_from(y).ok().filter(|&i| i < GRID_HEIGHT)
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Row at `y`, `None` if out of bounds
    pub fn row(&self, y: i8) -> Option<u8> {
        Self::index(y).map(|i| self.rows[i])
    }

    /// Overwrite row `y`. Returns false if out of bounds.
    pub fn set_row(&mut self, y: i8, bits: u8) -> bool {
        match Self::index(y) {
            Some(i) => {
                self.rows[i] = bits;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[u8; GRID_HEIGHT] {
        &self.rows
    }

    /// The 32 rows shown on the matrix
    pub fn visible_rows(&self) -> &[u8] {
        &self.rows[VISIBLE_TOP..VISIBLE_BOTTOM]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.rows = [0; GRID_HEIGHT];
    }

    /// Would the piece hit something if it fell one more row?
    ///
    /// Every occupied piece row is tested against the grid row directly below
    /// it, and the piece stops once its feet reach the last visible row.
    pub fn will_collide(&self, piece: &Piece, x: i8, y: i8) -> bool {
        let feet = piece.feet_index();
        for offset in 0..=feet {
            let below = self.row(y.saturating_add(offset as i8 + 1)).unwrap_or(0);
            if piece.shifted_row(offset, x) & below != 0 {
                return true;
            }
        }

        i32::from(y) + feet as i32 + 1 >= VISIBLE_BOTTOM as i32
    }

    /// Check a horizontal placement, reporting which constraint rejects it.
    ///
    /// `x < 0` pushes the piece past the right wall; a left edge beyond
    /// column 7 pushes it past the left wall. Feet below the last visible row
    /// are rejected too, so a rotated piece can always be committed.
    pub fn check_column_position(&self, piece: &Piece, x: i8, y: i8) -> Result<(), Blocked> {
        if x < 0 {
            return Err(Blocked::RightWall);
        }
        if i16::from(piece.leftmost_column()) + i16::from(x) > i16::from(GRID_COLUMNS - 1) {
            return Err(Blocked::LeftWall);
        }
        if i32::from(y) + piece.feet_index() as i32 >= VISIBLE_BOTTOM as i32 {
            return Err(Blocked::Floor);
        }
        for offset in 0..=piece.feet_index() {
            let placed = self.row(y.saturating_add(offset as i8)).unwrap_or(0);
            if piece.shifted_row(offset, x) & placed != 0 {
                return Err(Blocked::Occupied);
            }
        }
        Ok(())
    }

    /// Is `(x, y)` a legal resting place for the piece's columns?
    pub fn is_valid_column_position(&self, piece: &Piece, x: i8, y: i8) -> bool {
        self.check_column_position(piece, x, y).is_ok()
    }

    /// OR the piece into the grid.
    ///
    /// Fails without touching the grid if any occupied piece row lies outside it.
    pub fn commit(&mut self, piece: &Piece, x: i8, y: i8) -> Result<(), GridError> {
        let feet = y.saturating_add(piece.feet_index() as i8);
        let (Some(top), Some(_)) = (Self::index(y), Self::index(feet)) else {
            return Err(GridError::OutOfBounds { top: y, feet });
        };

        for offset in 0..=piece.feet_index() {
            self.rows[top + offset] |= piece.shifted_row(offset, x);
        }
        Ok(())
    }

    /// Remove every full row, shifting the rows above it down.
    ///
    /// Scans top to bottom. Each full row is overwritten by the rows above it
    /// and row 0 is zero-filled, so all simultaneously full rows are cleared in
    /// one call. Returns the cleared indices; its length is the row count.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..GRID_HEIGHT {
            if self.rows[y] != FULL_ROW {
                continue;
            }
            self.rows.copy_within(0..y, 1);
            self.rows[0] = 0;
            cleared.push(y);
        }
        cleared
    }

    /// Create from raw rows (testing and tooling)
    pub fn from_rows(rows: [u8; GRID_HEIGHT]) -> Self {
        Self { rows }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per row, leftmost column first, with a marker between the hidden
/// and visible zones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, &bits) in self.rows.iter().enumerate() {
            if y == VISIBLE_TOP || y == VISIBLE_BOTTOM {
                writeln!(f, "--------")?;
            }
            for col in (0..GRID_COLUMNS).rev() {
                let ch = if bits & (1 << col) != 0 { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
