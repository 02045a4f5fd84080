use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named set of key patterns, rendered by [`crate::help::HelpBar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        any_matches(&self.keys, event)
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    // Shift is already encoded in the character itself ('G' vs 'g').
    let ignore_shift = matches!(pattern.code, KeyCode::Char(_));
    modifiers_match(pattern.modifiers, event.modifiers, ignore_shift)
}

pub fn any_matches(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers, ignore_shift: bool) -> bool {
    pattern.ctrl == event.ctrl
        && pattern.alt == event.alt
        && (ignore_shift || pattern.shift == event.shift)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("^u", "clear", vec![key_ctrl('u')]);
        assert!(b.matches(&key_ctrl('u')));
        assert!(!b.matches(&key_char('u')));
    }

    #[test]
    fn any_matches_checks_every_pattern() {
        let keys = vec![key(KeyCode::Enter), key_char(' ')];
        assert!(any_matches(&keys, &key_char(' ')));
        assert!(!any_matches(&keys, &key_char('x')));
    }

    #[test]
    fn shifted_char_matches_plain_pattern() {
        let shifted = key_char('G').with_modifiers(KeyModifiers::shift());
        assert!(key_event_matches(&key_char('G'), &shifted));
        let back_tab = key(KeyCode::Tab).with_modifiers(KeyModifiers::shift());
        assert!(!key_event_matches(&key(KeyCode::Tab), &back_tab));
    }
}
