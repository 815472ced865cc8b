//! Key mapping from terminal events to buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the button it emulates.
pub fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Button::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Button::Down),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K' | ' ') => Some(Button::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
