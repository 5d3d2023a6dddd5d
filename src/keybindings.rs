//! Customizable keybindings for the annotator.
//!
//! Keys map to navigation and editing actions, and to palette selection.
//! Each color slot accepts both its digit and the unshifted AZERTY character
//! on the same key.

use serde::{Deserialize, Serialize};

use crate::message::Action;

/// A key the annotator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// A printable character
    Char(char),
    /// The space bar
    Space,
    /// The backspace key
    Backspace,
    /// The escape key
    Escape,
}

impl Key {
    /// Parse a key name as typed in a command: a single character, or one of
    /// `space`, `backspace`, `escape`/`esc`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c));
        }
        match name.to_ascii_lowercase().as_str() {
            "space" => Some(Key::Space),
            "backspace" => Some(Key::Backspace),
            "escape" | "esc" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Maximum number of palette colors that can have hotkeys (0-9 keys).
pub const MAX_COLOR_HOTKEYS: usize = 10;

/// Characters of the unshifted AZERTY top row, indexed by the digit they share a key with.
const AZERTY_DIGITS: [char; MAX_COLOR_HOTKEYS] =
    ['à', '&', 'é', '"', '\'', '(', '-', 'è', '_', 'ç'];

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Keys moving to the next entry
    pub next: Vec<Key>,
    /// Keys moving to the previous entry
    pub prev: Vec<Key>,
    /// Keys resetting the current entry
    pub clear: Vec<Key>,
    /// Keys saving the user image
    pub save: Vec<Key>,
    /// Keys ending the session
    pub quit: Vec<Key>,
    /// Hotkeys for palette selection; slot `i` selects palette index `i`
    pub color_hotkeys: Vec<Vec<Key>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let color_hotkeys = (0..MAX_COLOR_HOTKEYS)
            .map(|i| {
                let digit = char::from_digit(i as u32, 10).unwrap_or('0');
                vec![Key::Char(digit), Key::Char(AZERTY_DIGITS[i])]
            })
            .collect();
        Self {
            next: vec![Key::Char('n'), Key::Space],
            prev: vec![Key::Char('p'), Key::Backspace],
            clear: vec![Key::Char('c')],
            save: vec![Key::Char('s')],
            quit: vec![Key::Char('q'), Key::Escape],
            color_hotkeys,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the palette index (0-based) that corresponds to a key press, if any.
    pub fn color_index_for_key(&self, key: Key) -> Option<usize> {
        self.color_hotkeys
            .iter()
            .take(MAX_COLOR_HOTKEYS)
            .position(|keys| keys.contains(&key))
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<Action> {
        if self.next.contains(&key) {
            Some(Action::Next)
        } else if self.prev.contains(&key) {
            Some(Action::Prev)
        } else if self.clear.contains(&key) {
            Some(Action::Clear)
        } else if self.save.contains(&key) {
            Some(Action::Save)
        } else if self.quit.contains(&key) {
            Some(Action::Quit)
        } else {
            self.color_index_for_key(key).map(Action::SelectColor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_azerty_select_colors() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.color_index_for_key(Key::Char('0')), Some(0));
        assert_eq!(bindings.color_index_for_key(Key::Char('3')), Some(3));
        assert_eq!(bindings.color_index_for_key(Key::Char('é')), Some(2));
        assert_eq!(bindings.color_index_for_key(Key::Char('ç')), Some(9));
        assert_eq!(bindings.color_index_for_key(Key::Char('x')), None);
    }

    #[test]
    fn test_navigation_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for_key(Key::Space), Some(Action::Next));
        assert_eq!(bindings.action_for_key(Key::Char('p')), Some(Action::Prev));
        assert_eq!(bindings.action_for_key(Key::Backspace), Some(Action::Prev));
        assert_eq!(bindings.action_for_key(Key::Char('c')), Some(Action::Clear));
        assert_eq!(bindings.action_for_key(Key::Escape), Some(Action::Quit));
        assert_eq!(
            bindings.action_for_key(Key::Char('&')),
            Some(Action::SelectColor(1))
        );
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(Key::parse("n"), Some(Key::Char('n')));
        assert_eq!(Key::parse("é"), Some(Key::Char('é')));
        assert_eq!(Key::parse("Space"), Some(Key::Space));
        assert_eq!(Key::parse("esc"), Some(Key::Escape));
        assert_eq!(Key::parse("enter"), None);
        assert_eq!(Key::parse(""), None);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let bindings: KeyBindings = serde_json::from_str(r#"{"save": [{"char": "w"}]}"#).unwrap();
        assert_eq!(bindings.action_for_key(Key::Char('w')), Some(Action::Save));
        assert_eq!(bindings.action_for_key(Key::Char('s')), None);
        assert_eq!(bindings.action_for_key(Key::Char('n')), Some(Action::Next));
    }
}
