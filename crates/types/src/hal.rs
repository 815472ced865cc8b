//! Hardware boundary traits.
//!
//! The simulation never talks to devices directly. A board support package
//! (or the terminal host) implements these traits and hands them to the game
//! loop.
//!
//! Fallible operations carry an associated error type that converts into
//! `anyhow::Error`, so drivers can report whatever error they naturally
//! produce and the loop can propagate it with `?`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Button, PinLevel};

/// Column-addressed dot-matrix framebuffer (e.g. a MAX7219 chain).
///
/// `clear` and `set_column` only touch the pending frame; nothing reaches the
/// device until `display` flushes it.
pub trait MatrixDisplay {
    type Error;

    /// Blank the pending frame
    fn clear(&mut self);

    /// Set one 8-LED column of the pending frame. Out-of-range indices are ignored.
    fn set_column(&mut self, index: usize, bits: u8);

    /// Flush the pending frame to the device
    fn display(&mut self) -> Result<(), Self::Error>;
}

/// Numeric segment display (e.g. a TM1637 4-digit module).
pub trait ScoreDisplay {
    type Error;

    /// Show `value` right-aligned across `width` digits without leading zeros
    fn show_number(&mut self, value: u32, width: u8) -> Result<(), Self::Error>;
}

/// Polled, hardware-debounced button inputs.
pub trait ButtonSource {
    /// Current pin level of `button` (`Low` = pressed)
    fn read(&mut self, button: Button) -> PinLevel;

    fn is_pressed(&mut self, button: Button) -> bool {
        self.read(button).is_pressed()
    }
}

/// Monotonic millisecond clock with a blocking sleep.
pub trait Clock {
    fn now_ms(&self) -> u64;

    fn sleep_ms(&mut self, ms: u32);
}

// Shared handles, for hosts where one device backs both display traits.

impl<T: MatrixDisplay + ?Sized> MatrixDisplay for Rc<RefCell<T>> {
    type Error = T::Error;

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn set_column(&mut self, index: usize, bits: u8) {
        self.borrow_mut().set_column(index, bits);
    }

    fn display(&mut self) -> Result<(), Self::Error> {
        self.borrow_mut().display()
    }
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for Rc<RefCell<T>> {
    type Error = T::Error;

    fn show_number(&mut self, value: u32, width: u8) -> Result<(), Self::Error> {
        self.borrow_mut().show_number(value, width)
    }
}
