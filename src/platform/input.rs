//! Keyboard input as discrete press/release events

use serde::{Deserialize, Serialize};

/// Game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Shoot,
    Quit,
}

impl Key {
    /// Default keyboard binding (A/D/W, space, escape)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            'w' => Some(Key::Jump),
            ' ' => Some(Key::Shoot),
            '\u{1b}' => Some(Key::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window closed
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        assert_eq!(Key::from_char('a'), Some(Key::Left));
        assert_eq!(Key::from_char('D'), Some(Key::Right));
        assert_eq!(Key::from_char('w'), Some(Key::Jump));
        assert_eq!(Key::from_char(' '), Some(Key::Shoot));
        assert_eq!(Key::from_char('\u{1b}'), Some(Key::Quit));
        assert_eq!(Key::from_char('x'), None);
    }
}
