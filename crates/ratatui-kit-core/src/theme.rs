use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use std::fmt;

/// The process-wide visual mode. See [`crate::preference::ThemePreference`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// Interprets a stored value: `"dark"` is dark, anything else is light.
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style palette shared by all widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub success: Style,
    pub warning: Style,
    /// Page background.
    pub surface: Style,
    /// Table headers, filled inputs, placeholders.
    pub surface_alt: Style,
    pub border: Style,
    pub selected: Style,
    pub cursor: Style,
    pub skeleton: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            text_primary: Style::default().fg(Color::Black),
            text_muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Blue),
            danger: Style::default().fg(Color::Red),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            surface: Style::default().bg(Color::White),
            surface_alt: Style::default().bg(Color::Gray),
            border: Style::default().fg(Color::Gray),
            selected: Style::default().bg(Color::LightBlue),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            skeleton: Style::default().fg(Color::Gray),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            text_primary: Style::default().fg(Color::White),
            text_muted: Style::default().fg(Color::Gray),
            accent: Style::default().fg(Color::Cyan),
            danger: Style::default().fg(Color::LightRed),
            success: Style::default().fg(Color::LightGreen),
            warning: Style::default().fg(Color::LightYellow),
            surface: Style::default().bg(Color::Black),
            surface_alt: Style::default().bg(Color::DarkGray),
            border: Style::default().fg(Color::DarkGray),
            selected: Style::default().bg(Color::Indexed(24)),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            skeleton: Style::default().fg(Color::DarkGray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_follow_dark_or_light() {
        assert_eq!(ThemeMode::from_stored("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored("solarized"), ThemeMode::Light);
    }

    #[test]
    fn palette_matches_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Dark).mode, ThemeMode::Dark);
        assert_eq!(Theme::default().mode, ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }
}
