//! Backend-agnostic input events consumed by every widget in this crate.

use ratatui::layout::Position;
use ratatui::layout::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// `true` for a plain or shifted character with no ctrl/alt chord.
    pub fn is_text(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
}

impl InputEvent {
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    pub fn char(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    pub fn click(x: u16, y: u16) -> Self {
        Self::mouse(x, y, MouseEventKind::Down(MouseButton::Left))
    }

    pub fn scroll_up(x: u16, y: u16) -> Self {
        Self::mouse(x, y, MouseEventKind::ScrollUp)
    }

    pub fn scroll_down(x: u16, y: u16) -> Self {
        Self::mouse(x, y, MouseEventKind::ScrollDown)
    }

    fn mouse(x: u16, y: u16, kind: MouseEventKind) -> Self {
        Self::Mouse(MouseEvent {
            x,
            y,
            kind,
            modifiers: KeyModifiers::none(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Drag(MouseButton),
    Up(MouseButton),
    ScrollUp,
    ScrollDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Returns `true` if this is a left-button press inside `area`.
    pub fn is_left_click_in(&self, area: Rect) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left) && area.contains(self.position())
    }
}
