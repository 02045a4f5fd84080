use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::keymap::Binding;
use crate::preference::ThemePreference;
use crate::render;
use crate::theme::Theme;
use crate::theme::ThemeMode;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::text::Span;

const LIGHT_GLYPH: &str = "☀";
const DARK_GLYPH: &str = "☾";

#[derive(Clone, Debug)]
pub struct ThemeSwitchOptions {
    /// Show the name of the mode a toggle would switch to next to the glyph.
    pub show_hint: bool,
    pub align: Alignment,
    pub keys: Vec<KeyEvent>,
}

impl Default for ThemeSwitchOptions {
    fn default() -> Self {
        Self {
            show_hint: true,
            align: Alignment::Right,
            keys: vec![
                keymap::key(KeyCode::Enter),
                keymap::key_char(' '),
                keymap::key_char('t'),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSwitchAction {
    None,
    Toggled(ThemeMode),
}

/// Button that flips the shared [`ThemePreference`].
///
/// The switch keeps no mode of its own, so any number of switches over clones of one preference
/// always show the same state.
#[derive(Clone, Debug)]
pub struct ThemeSwitch {
    preference: ThemePreference,
    options: ThemeSwitchOptions,
    focused: bool,
    last_area: Option<Rect>,
}

impl ThemeSwitch {
    pub fn new(preference: ThemePreference) -> Self {
        Self::with_options(preference, ThemeSwitchOptions::default())
    }

    pub fn with_options(preference: ThemePreference, options: ThemeSwitchOptions) -> Self {
        Self {
            preference,
            options,
            focused: false,
            last_area: None,
        }
    }

    pub fn preference(&self) -> &ThemePreference {
        &self.preference
    }

    pub fn mode(&self) -> ThemeMode {
        self.preference.mode()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn toggle(&mut self) -> ThemeSwitchAction {
        ThemeSwitchAction::Toggled(self.preference.toggle())
    }

    /// Key presses only act while focused. Clicks act whenever they land on the switch.
    pub fn handle_event(&mut self, event: InputEvent) -> ThemeSwitchAction {
        match event {
            InputEvent::Key(key) => {
                if self.focused && keymap::any_matches(&self.options.keys, &key) {
                    self.toggle()
                } else {
                    ThemeSwitchAction::None
                }
            }
            InputEvent::Mouse(mouse) => match self.last_area {
                Some(area) if mouse.is_left_click_in(area) => self.toggle(),
                _ => ThemeSwitchAction::None,
            },
            InputEvent::Paste(_) => ThemeSwitchAction::None,
        }
    }

    pub fn help(&self) -> Binding {
        Binding::new("t", "theme", self.options.keys.clone())
    }

    /// Columns needed to draw the switch without truncation.
    pub fn required_width(&self) -> u16 {
        self.content(&Theme::for_mode(self.mode())).width() as u16
    }

    /// Draws the switch inside `area`. Only the drawn cells react to clicks.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            self.last_area = None;
            return;
        }
        let line = self.content(theme);
        let row = Rect::new(area.x, area.y, area.width, 1);
        let w = render::render_line_aligned(row, buf, &line, self.options.align);
        let x = match self.options.align {
            Alignment::Left => row.x,
            Alignment::Center => row.x + (row.width - w) / 2,
            Alignment::Right => row.right() - w,
        };
        self.last_area = Some(Rect::new(x, row.y, w, 1));
    }

    fn content(&self, theme: &Theme) -> Line<'static> {
        let mut base = theme.surface_alt.patch(theme.text_primary);
        if self.focused {
            base = base.add_modifier(Modifier::REVERSED);
        }
        let (glyph, glyph_style) = match self.mode() {
            ThemeMode::Light => (LIGHT_GLYPH, theme.warning),
            ThemeMode::Dark => (DARK_GLYPH, theme.accent),
        };
        let mut spans = vec![
            Span::styled(" ", base),
            Span::styled(glyph, base.patch(glyph_style)),
            Span::styled(" ", base),
        ];
        if self.options.show_hint {
            let target = match self.mode().toggled() {
                ThemeMode::Light => "Light",
                ThemeMode::Dark => "Dark",
            };
            spans.push(Span::styled(target, base.patch(theme.text_muted)));
            spans.push(Span::styled(" ", base));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::FixedAppearance;
    use crate::preference::MemoryStore;
    use crate::preference::THEME_KEY;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn render(switch: &mut ThemeSwitch, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        let theme = switch.preference().theme();
        switch.render(area, &mut buf, &theme);
        row_text(&buf, 0)
    }

    #[test]
    fn shows_glyph_and_target_mode() {
        let mut switch = ThemeSwitch::new(ThemePreference::ephemeral(ThemeMode::Light));
        assert_eq!(render(&mut switch, 12), "     ☀ Dark ");
        switch.toggle();
        assert_eq!(render(&mut switch, 12).trim(), "☾ Light");
    }

    #[test]
    fn keys_need_focus() {
        let store = MemoryStore::new();
        let pref = ThemePreference::load(store.clone(), &FixedAppearance(false));
        let mut switch = ThemeSwitch::new(pref);
        assert_eq!(
            switch.handle_event(InputEvent::char('t')),
            ThemeSwitchAction::None
        );
        switch.set_focused(true);
        assert_eq!(
            switch.handle_event(InputEvent::key(KeyCode::Enter)),
            ThemeSwitchAction::Toggled(ThemeMode::Dark)
        );
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn clicks_only_hit_drawn_cells() {
        let mut switch = ThemeSwitch::new(ThemePreference::ephemeral(ThemeMode::Light));
        render(&mut switch, 20);
        assert_eq!(
            switch.handle_event(InputEvent::click(0, 0)),
            ThemeSwitchAction::None
        );
        assert_eq!(
            switch.handle_event(InputEvent::click(19, 0)),
            ThemeSwitchAction::Toggled(ThemeMode::Dark)
        );
    }

    #[test]
    fn switches_sharing_a_preference_agree() {
        let pref = ThemePreference::ephemeral(ThemeMode::Light);
        let mut a = ThemeSwitch::new(pref.clone());
        let b = ThemeSwitch::new(pref.clone());
        a.toggle();
        assert_eq!(b.mode(), ThemeMode::Dark);
        assert_eq!(pref.mode(), ThemeMode::Dark);
        assert_eq!(a.required_width(), b.required_width());
    }
}
