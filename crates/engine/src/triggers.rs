//! Software edge detection for polled buttons.
//!
//! Buttons are sampled once per loop iteration, so "pressed" transitions are
//! found by comparing each sample with the previous one.

/// Fires once per press: on the released -> pressed transition.
#[derive(Debug, Clone, Default)]
pub struct EdgeTrigger {
    previous: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current sample; true on a fresh press
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.previous;
        self.previous = pressed;
        fired
    }
}

/// Fires while held, at most once per `interval_ms`.
#[derive(Debug, Clone)]
pub struct RepeatGate {
    interval_ms: u64,
    last_fire_ms: u64,
}

impl RepeatGate {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_fire_ms: 0,
        }
    }

    /// Feed the current sample and time; true when an action should run
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if !pressed || now_ms.saturating_sub(self.last_fire_ms) < self.interval_ms {
            return false;
        }
        self.last_fire_ms = now_ms;
        true
    }
}
