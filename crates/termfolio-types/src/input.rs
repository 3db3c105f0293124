//! Platform-agnostic input event types.
//!
//! The front-end maps its native key and mouse events to these enums. The
//! simulator never sees raw terminal input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Character typed into the input line.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// Replace the whole input line (two-way binding from a text field).
    SetText(String),
    /// A named key pressed.
    KeyPress(Key),
    /// Pointer moved to an absolute cell position.
    PointerMove { col: u16, row: u16 },
    /// The surface was resized to `cols` x `rows` cells.
    Resize { cols: u16, rows: u16 },
    /// User requested quit.
    Quit,
}

/// Keys the input line reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Up,
    Down,
    Tab,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_all_variants() {
        for key in [Key::Enter, Key::Up, Key::Down, Key::Tab] {
            let e = InputEvent::KeyPress(key);
            assert_eq!(e, InputEvent::KeyPress(key));
        }
    }

    #[test]
    fn text_input_differs_by_char() {
        assert_ne!(InputEvent::TextInput('a'), InputEvent::TextInput('b'));
    }

    #[test]
    fn pointer_move_fields() {
        let e = InputEvent::PointerMove { col: 3, row: 7 };
        if let InputEvent::PointerMove { col, row } = e {
            assert_eq!((col, row), (3, 7));
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn key_serde_roundtrip_name() {
        let json = serde_json::to_string(&Key::Tab).unwrap();
        assert_eq!(json, "\"Tab\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Key::Tab);
    }
}
