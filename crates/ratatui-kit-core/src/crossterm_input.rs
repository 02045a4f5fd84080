//! Conversions from `crossterm` events (feature `crossterm`).

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crossterm::event as ct;

/// Maps a raw `crossterm` event into an [`InputEvent`].
///
/// Key releases/repeats, focus changes and resizes map to `None`; apps handle resizes by simply
/// redrawing.
pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Press => {
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Paste(text) => Some(InputEvent::Paste(text)),
        ct::Event::Mouse(m) => mouse_event_from_crossterm(m).map(InputEvent::Mouse),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(KeyEvent::new(code).with_modifiers(modifiers(key.modifiers)))
}

pub fn mouse_event_from_crossterm(m: ct::MouseEvent) -> Option<MouseEvent> {
    let kind = match m.kind {
        ct::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
        ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
        ct::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
        ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };
    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers(m.modifiers),
    })
}

fn modifiers(m: ct::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(ct::KeyModifiers::SHIFT),
        ctrl: m.contains(ct::KeyModifiers::CONTROL),
        alt: m.contains(ct::KeyModifiers::ALT),
    }
}

fn button(b: ct::MouseButton) -> MouseButton {
    match b {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_key_release() {
        let mut key = ct::KeyEvent::new(ct::KeyCode::Char('a'), ct::KeyModifiers::NONE);
        key.kind = ct::KeyEventKind::Release;
        assert_eq!(input_event_from_crossterm(ct::Event::Key(key)), None);
    }

    #[test]
    fn maps_ctrl_chord() {
        let key = ct::KeyEvent::new(ct::KeyCode::Char('u'), ct::KeyModifiers::CONTROL);
        let ev = input_event_from_crossterm(ct::Event::Key(key));
        assert_eq!(
            ev,
            Some(InputEvent::Key(
                KeyEvent::new(KeyCode::Char('u')).with_modifiers(KeyModifiers::ctrl())
            ))
        );
    }
}
