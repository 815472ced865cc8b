//! RNG module - entropy for piece selection
//!
//! Every spawn asks an [`EntropySource`] for a shape index in `0..7`. On the
//! microcontroller that is a floating analog pin read modulo 7; here the
//! default is a small seeded LCG so games are reproducible, and any closure
//! returning `usize` works as well.

use crate::types::SHAPE_COUNT;

/// Supplies shape table indices for spawning.
pub trait EntropySource {
    /// Next index; callers reduce it modulo 7, so any value is accepted
    fn next_shape_index(&mut self) -> usize;
}

impl<F> EntropySource for F
where
    F: FnMut() -> usize,
{
    fn next_shape_index(&mut self) -> usize {
        self()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EntropySource for SimpleRng {
    fn next_shape_index(&mut self) -> usize {
        self.next_range(SHAPE_COUNT as u32) as usize
    }
}

/// Replays a fixed list of shape indices, wrapping around at the end.
///
/// Handy for scripted games and tests.
#[derive(Debug, Clone)]
pub struct ShapeSequence<const N: usize> {
    indices: [usize; N],
    cursor: usize,
}

impl<const N: usize> ShapeSequence<N> {
    pub fn new(indices: [usize; N]) -> Self {
        Self { indices, cursor: 0 }
    }
}

impl<const N: usize> EntropySource for ShapeSequence<N> {
    fn next_shape_index(&mut self) -> usize {
        if N == 0 {
            return 0;
        }
        let index = self.indices[self.cursor % N];
        self.cursor = self.cursor.wrapping_add(1);
        index
    }
}
