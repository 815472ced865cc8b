//! Pieces module - tetromino bitmasks and bounding-box rotation
//!
//! A piece is a 4x4 box stored as four row bytes. Only the low nibble of each
//! row is used; bit 0 is the rightmost column of the box. Placing a piece on
//! the 8-column grid shifts its rows by the piece's `x` offset (see
//! [`Piece::shifted_row`]), so a larger `x` moves the piece to the left.

use std::fmt;

use crate::types::PieceKind;

/// Rows of a piece box, top row first
pub type PieceRows = [u8; 4];

/// Canonical spawn shapes, indexed by [`PieceKind::index`]
pub const SHAPES: [PieceRows; 7] = [
    [0x02, 0x02, 0x03, 0x00], // L
    [0x01, 0x01, 0x03, 0x00], // J
    [0x01, 0x01, 0x01, 0x01], // I
    [0x03, 0x03, 0x00, 0x00], // O
    [0x02, 0x07, 0x00, 0x00], // T
    [0x06, 0x03, 0x00, 0x00], // Z
    [0x03, 0x06, 0x00, 0x00], // S
];

const BOX_SIZE: usize = 4;

/// One tetromino in its current orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    rows: PieceRows,
}

impl Piece {
    /// Spawn orientation of `kind`
    pub fn new(kind: PieceKind) -> Self {
        Self {
            rows: SHAPES[kind.index()],
        }
    }

    /// Build a piece from raw rows. Bits above the low nibble are dropped.
    pub fn from_rows(rows: PieceRows) -> Self {
        Self {
            rows: rows.map(|r| r & 0x0F),
        }
    }

    pub fn rows(&self) -> PieceRows {
        self.rows
    }

    /// Raw row of the piece box (0 when `index` is outside the box)
    pub fn row(&self, index: usize) -> u8 {
        self.rows.get(index).copied().unwrap_or(0)
    }

    /// Row `index` placed at column offset `x`.
    ///
    /// Non-negative offsets shift left, negative offsets shift right. Bits that
    /// leave the 8-column byte are dropped.
    #[inline(always)]
    pub fn shifted_row(&self, index: usize, x: i8) -> u8 {
        shift_row(self.row(index), x)
    }

    /// Index of the lowest row that holds any cell.
    ///
    /// An empty box (which a valid piece never is) reports 0.
    pub fn feet_index(&self) -> usize {
        self.rows.iter().rposition(|&r| r != 0).unwrap_or(0)
    }

    /// Column furthest to the left occupied by any row (highest bit index, 0..=3).
    ///
    /// With this convention `leftmost_column() + x` is the grid column of the
    /// piece's left edge.
    pub fn leftmost_column(&self) -> u8 {
        let occupied = self.rows.iter().fold(0u8, |acc, &r| acc | r);
        (u8::BITS - occupied.leading_zeros()).saturating_sub(1) as u8
    }

    /// Number of occupied cells (4 for every valid piece)
    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Rotate 90° around the bounding box.
    ///
    /// Each cell (col, row) maps to (-row, col); the result is translated back
    /// so the smallest column and row are 0.
    pub fn rotated(&self) -> Self {
        let mut points = [(0i8, 0i8); BOX_SIZE * BOX_SIZE];
        let mut count = 0;
        for (row, &bits) in self.rows.iter().enumerate() {
            for col in 0..BOX_SIZE {
                if bits & (1 << col) != 0 {
                    points[count] = (-(row as i8), col as i8);
                    count += 1;
                }
            }
        }
        let points = &points[..count];

        let min_x = points.iter().map(|p| p.0).min().unwrap_or(0);
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);

        let mut rows = [0u8; BOX_SIZE];
        for &(x, y) in points {
            rows[(y - min_y) as usize] |= 1 << (x - min_x);
        }
        Self { rows }
    }

    /// Rotate in place
    pub fn rotate(&mut self) {
        *self = self.rotated();
    }
}

impl From<PieceKind> for Piece {
    fn from(kind: PieceKind) -> Self {
        Self::new(kind)
    }
}

/// Renders the box as four lines of `#`/`.` with the leftmost column first.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &bits) in self.rows.iter().enumerate() {
            for col in (0..BOX_SIZE).rev() {
                let ch = if bits & (1 << col) != 0 { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            if i + 1 < BOX_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Shift a row byte to column offset `x` (left for `x >= 0`, right otherwise).
#[inline(always)]
pub fn shift_row(bits: u8, x: i8) -> u8 {
    let amount = u32::from(x.unsigned_abs());
    if x >= 0 {
        ((u16::from(bits)).checked_shl(amount).unwrap_or(0) & 0xFF) as u8
    } else {
        bits.checked_shr(amount).unwrap_or(0)
    }
}
