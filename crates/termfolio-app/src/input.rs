use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use termfolio_types::input::{InputEvent, Key};

/// Map a terminal event to a session event. Events the session has no use
/// for (releases, scrolls, focus changes, other control chords) map to `None`.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputEvent::PointerMove {
                col: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        Event::Resize(cols, rows) => Some(InputEvent::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        (KeyCode::Char(_), m) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        (KeyCode::Char(c), _) => Some(InputEvent::TextInput(c)),
        (KeyCode::Backspace, _) => Some(InputEvent::Backspace),
        (KeyCode::Enter, _) => Some(InputEvent::KeyPress(Key::Enter)),
        (KeyCode::Up, _) => Some(InputEvent::KeyPress(Key::Up)),
        (KeyCode::Down, _) => Some(InputEvent::KeyPress(Key::Down)),
        (KeyCode::Tab, _) => Some(InputEvent::KeyPress(Key::Tab)),
        _ => None,
    }
}
