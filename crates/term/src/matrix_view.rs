//! MatrixView: draws latched matrix columns and the score readout.
//!
//! Pure (no I/O). The 32 matrix columns are drawn as terminal rows, top to
//! bottom, so the playfield reads like a normal upright Tetris well. Bit 7 of
//! each column is the leftmost LED.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GRID_COLUMNS, MATRIX_WIDTH};

/// Terminal columns per LED; 2 compensates for the glyph aspect ratio.
const LED_W: u16 = 2;
const SIDE_GAP: u16 = 2;
const SIDE_W: u16 = 14;

const LED_ON: CellStyle = CellStyle::plain(Rgb::new(255, 40, 40)).bold();
const LED_OFF: CellStyle = CellStyle::plain(Rgb::new(70, 20, 20)).dim();
const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::plain(Rgb::new(220, 220, 220)).bold();
const DIGITS: CellStyle = CellStyle::plain(Rgb::new(80, 255, 120)).bold();
const HELP: CellStyle = CellStyle::plain(Rgb::new(150, 150, 150)).dim();

const KEY_HELP: [&str; 5] = [
    "<- A H  left",
    "-> D L  right",
    "v  S J  down",
    "^  W K  rotate",
    "q       quit",
];

/// What is currently latched on the two displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub columns: [u8; MATRIX_WIDTH],
    /// Last number written to the score display and its digit count
    pub score: Option<(u32, u8)>,
}

impl Default for PanelSnapshot {
    fn default() -> Self {
        Self {
            columns: [0; MATRIX_WIDTH],
            score: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixView;

impl MatrixView {
    /// Frame width in terminal cells (matrix box + score panel)
    pub fn width(&self) -> u16 {
        self.matrix_frame_w() + SIDE_GAP + SIDE_W
    }

    /// Frame height in terminal cells
    pub fn height(&self) -> u16 {
        MATRIX_WIDTH as u16 + 2
    }

    fn matrix_frame_w(&self) -> u16 {
        u16::from(GRID_COLUMNS) * LED_W + 2
    }

    pub fn render_into(&self, snap: &PanelSnapshot, fb: &mut FrameBuffer) {
        fb.resize(self.width(), self.height());
        fb.clear();

        let frame_w = self.matrix_frame_w();
        draw_border(fb, 0, 0, frame_w, self.height());

        for (i, &bits) in snap.columns.iter().enumerate() {
            let y = 1 + i as u16;
            for led in 0..GRID_COLUMNS {
                let bit = GRID_COLUMNS - 1 - led;
                let (ch, style) = if bits & (1 << bit) != 0 {
                    ('●', LED_ON)
                } else {
                    ('·', LED_OFF)
                };
                let x = 1 + u16::from(led) * LED_W;
                fb.put_char(x, y, ch, style);
                fb.put_char(x + 1, y, ' ', style);
            }
        }

        let panel_x = frame_w + SIDE_GAP;
        fb.put_str(panel_x, 0, "SCORE", LABEL);
        if let Some((value, width)) = snap.score {
            fb.put_char(panel_x, 1, '[', DIGITS);
            for position in 0..width {
                let x = panel_x + 1 + u16::from(position);
                fb.put_char(x, 1, score_digit(value, width, position), DIGITS);
            }
            fb.put_char(panel_x + 1 + u16::from(width), 1, ']', DIGITS);
        }
        for (i, line) in KEY_HELP.iter().enumerate() {
            fb.put_str(panel_x, 3 + i as u16, line, HELP);
        }
    }

    pub fn render(&self, snap: &PanelSnapshot) -> FrameBuffer {
        let mut fb = FrameBuffer::new(self.width(), self.height());
        self.render_into(snap, &mut fb);
        fb
    }
}

/// The character a `width`-digit segment display shows at `position`
/// (0 is leftmost) for `value`: right-aligned, no leading zeros, higher
/// digits dropped.
pub fn score_digit(value: u32, width: u8, position: u8) -> char {
    if position >= width {
        return ' ';
    }
    let shown = match 10u64.checked_pow(u32::from(width)) {
        Some(modulus) => u64::from(value) % modulus,
        None => u64::from(value),
    };
    let place = u32::from(width - 1 - position);
    let Some(scale) = 10u64.checked_pow(place) else {
        return ' ';
    };
    if place > 0 && shown < scale {
        return ' ';
    }
    char::from_digit((shown / scale % 10) as u32, 10).unwrap_or(' ')
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', BORDER);
    fb.put_char(x + w - 1, y, '┐', BORDER);
    fb.put_char(x, y + h - 1, '└', BORDER);
    fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', BORDER);
        fb.put_char(x + dx, y + h - 1, '─', BORDER);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', BORDER);
        fb.put_char(x + w - 1, y + dy, '│', BORDER);
    }
}
