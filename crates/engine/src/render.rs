//! Render adapter: grid + active piece -> matrix columns.
//!
//! Visible grid row `VISIBLE_TOP + i` becomes matrix column `i`, so the
//! playfield runs along the 32-LED length of the display. The projection is
//! pure; only [`render_frame`] and [`play_closing_animation`] touch the sink.

use crate::core::{ActivePiece, Grid};
use crate::types::{Clock, MatrixDisplay, FULL_ROW, MATRIX_WIDTH, VISIBLE_TOP};

/// One frame worth of matrix columns
pub type MatrixColumns = [u8; MATRIX_WIDTH];

/// Project the visible rows and the active piece into matrix columns.
pub fn project_columns(grid: &Grid, active: Option<&ActivePiece>) -> MatrixColumns {
    let mut columns = [0u8; MATRIX_WIDTH];
    columns.copy_from_slice(grid.visible_rows());

    if let Some(a) = active {
        for (column, bits) in columns.iter_mut().enumerate() {
            let grid_row = (column + VISIBLE_TOP) as i32;
            let offset = grid_row - i32::from(a.y);
            if (0..4).contains(&offset) {
                *bits |= a.piece.shifted_row(offset as usize, a.x);
            }
        }
    }
    columns
}

/// Write a frame: clear, set every column, flush.
pub fn render_frame<D: MatrixDisplay>(
    display: &mut D,
    columns: &MatrixColumns,
) -> Result<(), D::Error> {
    display.clear();
    for (index, &bits) in columns.iter().enumerate() {
        display.set_column(index, bits);
    }
    display.display()
}

/// Game over curtain: columns fill from both ends towards the middle, hold,
/// then empty again in the same order.
pub fn play_closing_animation<D: MatrixDisplay, C: Clock>(
    display: &mut D,
    clock: &mut C,
    step_ms: u32,
    hold_ms: u32,
) -> Result<(), D::Error> {
    sweep(display, clock, FULL_ROW, step_ms)?;
    clock.sleep_ms(hold_ms);
    sweep(display, clock, 0x00, step_ms)
}

fn sweep<D: MatrixDisplay, C: Clock>(
    display: &mut D,
    clock: &mut C,
    bits: u8,
    step_ms: u32,
) -> Result<(), D::Error> {
    for i in 0..MATRIX_WIDTH / 2 {
        display.set_column(i, bits);
        display.set_column(MATRIX_WIDTH - 1 - i, bits);
        display.display()?;
        clock.sleep_ms(step_ms);
    }
    Ok(())
}
