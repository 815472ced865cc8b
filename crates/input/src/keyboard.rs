//! Held-key tracking for terminal environments.
//!
//! Buttons are level-sensitive: the game loop polls them and does its own edge
//! detection. A key counts as held from its press event until its release
//! event, or until no press/repeat event has arrived for the release timeout
//! on terminals that never emit releases.
//!
//! Without release events the first auto-repeat arrives much later than the
//! ones after it. Left, right and rotate are edge-triggered, so a key's first
//! event holds it for the repeat delay and one long press reads as one press.
//! The cost is that a second tap inside that delay merges into the first.
//! Down is level-triggered and uses the short timeout from the start.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::button_for_key;
use crate::types::{Button, ButtonSource, PinLevel};

// Without release events, the OS auto-repeat keeps a held key alive; a tap
// is released shortly after its single press event.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;
// Typical first auto-repeat delays are 250-500 ms.
const DEFAULT_REPEAT_DELAY_MS: u32 = 550;

/// Keyboard-backed [`ButtonSource`].
#[derive(Debug, Clone)]
pub struct KeyboardButtons {
    last_seen: [Option<Instant>; 4],
    /// Has the held key produced more than one event?
    repeating: [bool; 4],
    key_release_timeout_ms: Option<u32>,
    repeat_delay_ms: u32,
}

impl KeyboardButtons {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 4],
            repeating: [false; 4],
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
        }
    }

    /// How long an edge-triggered key's first event holds it.
    pub fn with_repeat_delay_ms(mut self, delay_ms: u32) -> Self {
        self.repeat_delay_ms = delay_ms;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = Some(timeout_ms);
        self
    }

    /// Hold keys until their release event (terminal reports event types).
    pub fn with_release_events(mut self) -> Self {
        self.key_release_timeout_ms = None;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the button it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Button> {
        self.handle_key_event_at(key, Instant::now())
    }

    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) -> Option<Button> {
        let button = button_for_key(key.code)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press_at(button, now),
            KeyEventKind::Release => self.release(button),
        }
        Some(button)
    }

    /// A press or repeat event. Extends the current hold if there is one.
    pub fn press_at(&mut self, button: Button, now: Instant) {
        let i = slot(button);
        self.repeating[i] = self.is_held_at(button, now);
        self.last_seen[i] = Some(now);
    }

    pub fn release(&mut self, button: Button) {
        let i = slot(button);
        self.last_seen[i] = None;
        self.repeating[i] = false;
    }

    /// Is `button` held as of `now`?
    pub fn is_held_at(&self, button: Button, now: Instant) -> bool {
        let i = slot(button);
        let Some(seen) = self.last_seen[i] else {
            return false;
        };
        let Some(timeout) = self.key_release_timeout_ms else {
            return true;
        };
        let window = if self.repeating[i] || button == Button::Down {
            timeout
        } else {
            timeout.max(self.repeat_delay_ms)
        };
        now.saturating_duration_since(seen) <= Duration::from_millis(u64::from(window))
    }

    /// Release every button.
    pub fn reset(&mut self) {
        self.last_seen = [None; 4];
        self.repeating = [false; 4];
    }
}

impl Default for KeyboardButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonSource for KeyboardButtons {
    fn read(&mut self, button: Button) -> PinLevel {
        PinLevel::from_pressed(self.is_held_at(button, Instant::now()))
    }
}

fn slot(button: Button) -> usize {
    match button {
        Button::Left => 0,
        Button::Right => 1,
        Button::Down => 2,
        Button::Rotate => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_press_holds_through_repeat_delay() {
        let mut kb = KeyboardButtons::new()
            .with_key_release_timeout_ms(50)
            .with_repeat_delay_ms(400);
        let t0 = Instant::now();

        assert_eq!(
            kb.handle_key_event_at(key(KeyCode::Left, KeyEventKind::Press), t0),
            Some(Button::Left)
        );
        assert!(kb.is_held_at(Button::Left, t0 + ms(400)));
        assert!(!kb.is_held_at(Button::Left, t0 + ms(401)));
        assert!(!kb.is_held_at(Button::Right, t0));
    }

    #[test]
    fn test_repeats_switch_to_short_timeout() {
        let mut kb = KeyboardButtons::new()
            .with_key_release_timeout_ms(50)
            .with_repeat_delay_ms(400);
        let t0 = Instant::now();

        kb.handle_key_event_at(key(KeyCode::Left, KeyEventKind::Press), t0);
        // Terminals without the enhancement protocol report repeats as presses.
        kb.handle_key_event_at(key(KeyCode::Left, KeyEventKind::Press), t0 + ms(300));
        assert!(kb.is_held_at(Button::Left, t0 + ms(350)));
        assert!(!kb.is_held_at(Button::Left, t0 + ms(351)));
    }

    #[test]
    fn test_one_long_press_is_one_edge() {
        let mut kb = KeyboardButtons::new();
        let t0 = Instant::now();
        let mut previous = false;
        let mut edges = 0;

        kb.handle_key_event_at(key(KeyCode::Up, KeyEventKind::Press), t0);
        for step in 0..=12u64 {
            let now = t0 + ms(step * 50);
            if step >= 6 {
                kb.handle_key_event_at(key(KeyCode::Up, KeyEventKind::Repeat), now);
            }
            let held = kb.is_held_at(Button::Rotate, now);
            if held && !previous {
                edges += 1;
            }
            previous = held;
        }
        assert_eq!(edges, 1);
    }

    #[test]
    fn test_down_tap_releases_quickly() {
        let mut kb = KeyboardButtons::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();
        kb.handle_key_event_at(key(KeyCode::Down, KeyEventKind::Press), t0);
        assert!(kb.is_held_at(Button::Down, t0 + ms(50)));
        assert!(!kb.is_held_at(Button::Down, t0 + ms(51)));
    }

    #[test]
    fn test_repeat_events_keep_key_held() {
        let mut kb = KeyboardButtons::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        kb.handle_key_event_at(key(KeyCode::Down, KeyEventKind::Press), t0);
        kb.handle_key_event_at(key(KeyCode::Down, KeyEventKind::Repeat), t0 + ms(40));
        assert!(kb.is_held_at(Button::Down, t0 + ms(80)));
    }

    #[test]
    fn test_release_event_clears_immediately() {
        let mut kb = KeyboardButtons::new().with_release_events();
        let t0 = Instant::now();

        kb.handle_key_event_at(key(KeyCode::Up, KeyEventKind::Press), t0);
        assert!(kb.is_held_at(Button::Rotate, t0 + ms(10_000)));

        kb.handle_key_event_at(key(KeyCode::Up, KeyEventKind::Release), t0);
        assert!(!kb.is_held_at(Button::Rotate, t0));
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut kb = KeyboardButtons::new();
        let t0 = Instant::now();
        assert_eq!(
            kb.handle_key_event_at(key(KeyCode::Char('x'), KeyEventKind::Press), t0),
            None
        );
        assert!(Button::ALL.iter().all(|&b| !kb.is_held_at(b, t0)));
    }

    #[test]
    fn test_read_reports_active_low() {
        let mut kb = KeyboardButtons::new().with_release_events();
        assert_eq!(kb.read(Button::Right), PinLevel::High);
        kb.press_at(Button::Right, Instant::now());
        assert_eq!(kb.read(Button::Right), PinLevel::Low);
        assert!(kb.is_pressed(Button::Right));

        kb.reset();
        assert!(!kb.is_pressed(Button::Right));
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let kb = KeyboardButtons::new();
        assert!(kb.key_release_timeout_ms().is_some_and(|t| t > 0));
    }
}
