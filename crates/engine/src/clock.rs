//! Clock implementations.

use std::time::{Duration, Instant};

use crate::types::Clock;

/// Wall clock backed by `Instant` and `thread::sleep`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Simulated clock: sleeping advances time instantly.
///
/// Lets simulations and tests run the loop at full speed with exact timing.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
    slept_ms: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Total time spent in `sleep_ms`
    pub fn slept_ms(&self) -> u64 {
        self.slept_ms
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
        self.slept_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_on_sleep() {
        let mut c = ManualClock::new();
        c.sleep_ms(50);
        c.advance(5);
        assert_eq!(c.now_ms(), 55);
        assert_eq!(c.slept_ms(), 50);
    }
}
