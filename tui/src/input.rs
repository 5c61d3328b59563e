//! Terminal input translation
//!
//! Maps raw crossterm events onto machine [`Event`]s. Only key presses and
//! resizes matter; everything else is dropped here.

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::machine::{Event, Key};

/// Translate a terminal event, or `None` if the machine doesn't care
pub fn translate(event: TermEvent) -> Option<Event> {
    match event {
        // Only handle Press events (not Release or Repeat)
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(translate_key(key))),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(c),
        _ => Key::Other,
    }
}
