//! Loop timing configuration.
//!
//! Defaults come from the constants in `matrix_tetris_types`. Hosts can
//! override them through environment variables:
//!
//! - `TETRIS_TICK_MS`: loop poll interval (default 50)
//! - `TETRIS_DROP_MS`: gravity interval (default 500)
//! - `TETRIS_SOFT_DROP_MS`: down button re-trigger interval (default 50)
//!
//! Missing, unparsable or zero values keep the default.

use crate::types::{
    CLOSING_HOLD_MS, CLOSING_STEP_MS, DROP_DELAY_MS, SOFT_DROP_INTERVAL_MS, TICK_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub tick_ms: u32,
    pub drop_delay_ms: u32,
    pub soft_drop_interval_ms: u32,
    pub closing_step_ms: u32,
    pub closing_hold_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            drop_delay_ms: DROP_DELAY_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            closing_step_ms: CLOSING_STEP_MS,
            closing_hold_ms: CLOSING_HOLD_MS,
        }
    }
}

impl LoopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, config file, tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let ms = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(default)
        };

        Self {
            tick_ms: ms("TETRIS_TICK_MS", defaults.tick_ms),
            drop_delay_ms: ms("TETRIS_DROP_MS", defaults.drop_delay_ms),
            soft_drop_interval_ms: ms("TETRIS_SOFT_DROP_MS", defaults.soft_drop_interval_ms),
            ..defaults
        }
    }
}
