//! TerminalPanel: the matrix and score display drivers for a terminal host.
//!
//! Like the real MAX7219 chain, `clear`/`set_column` only touch a pending
//! buffer and nothing is visible until `display` latches it. Score updates
//! redraw immediately with the last latched matrix frame.

use std::io::{self, Write};

use anyhow::Result;

use crate::fb::FrameBuffer;
use crate::matrix_view::{MatrixView, PanelSnapshot};
use crate::renderer::TerminalRenderer;
use crate::types::{MatrixDisplay, ScoreDisplay, MATRIX_WIDTH};

pub struct TerminalPanel<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: MatrixView,
    fb: FrameBuffer,
    pending: [u8; MATRIX_WIDTH],
    latched: PanelSnapshot,
    frames: u64,
}

impl TerminalPanel<io::Stdout> {
    pub fn new() -> Self {
        Self::with_renderer(TerminalRenderer::new())
    }
}

impl Default for TerminalPanel<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPanel<W> {
    pub fn with_renderer(renderer: TerminalRenderer<W>) -> Self {
        let view = MatrixView;
        Self {
            fb: FrameBuffer::new(view.width(), view.height()),
            renderer,
            view,
            pending: [0; MATRIX_WIDTH],
            latched: PanelSnapshot::default(),
            frames: 0,
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    /// What the two displays currently show
    pub fn snapshot(&self) -> &PanelSnapshot {
        &self.latched
    }

    /// Number of flushes to the terminal so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Redraw everything, e.g. after a terminal resize.
    pub fn redraw(&mut self) -> Result<()> {
        self.renderer.invalidate();
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        self.view.render_into(&self.latched, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.frames += 1;
        Ok(())
    }
}

impl<W: Write> MatrixDisplay for TerminalPanel<W> {
    type Error = anyhow::Error;

    fn clear(&mut self) {
        self.pending = [0; MATRIX_WIDTH];
    }

    fn set_column(&mut self, index: usize, bits: u8) {
        if let Some(column) = self.pending.get_mut(index) {
            *column = bits;
        }
    }

    fn display(&mut self) -> Result<()> {
        self.latched.columns = self.pending;
        self.draw()
    }
}

impl<W: Write> ScoreDisplay for TerminalPanel<W> {
    type Error = anyhow::Error;

    fn show_number(&mut self, value: u32, width: u8) -> Result<()> {
        self.latched.score = Some((value, width));
        self.draw()
    }
}
