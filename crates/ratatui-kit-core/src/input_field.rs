use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Margin;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;
use std::borrow::Cow;
use tracing::debug;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const BUSY_GLYPH: &str = "◌";
const CLEAR_GLYPH: &str = "×";
const SHOW_GLYPH: &str = "◉";
const HIDE_GLYPH: &str = "○";
const MASK_CHAR: char = '•';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputVariant {
    /// Tinted background, no border.
    Filled,
    #[default]
    Outlined,
    /// A rule under the value and nothing else.
    Ghost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl InputSize {
    fn padding(self) -> u16 {
        match self {
            InputSize::Sm => 0,
            InputSize::Md => 1,
            InputSize::Lg => 2,
        }
    }

    fn inner_height(self) -> u16 {
        match self {
            InputSize::Lg => 3,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    /// Rendered obscured unless the visibility toggle was used.
    Password,
}

/// Presentation and behaviour flags for an [`InputField`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFieldProps {
    pub label: Option<String>,
    pub placeholder: String,
    pub helper_text: Option<String>,
    /// Shown instead of the helper text. Its presence also marks the field invalid.
    pub error_message: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub loading: bool,
    pub variant: InputVariant,
    pub size: InputSize,
    pub kind: InputKind,
    pub show_clear_button: bool,
    pub show_password_toggle: bool,
}

impl InputFieldProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn show_clear_button(mut self, show: bool) -> Self {
        self.show_clear_button = show;
        self
    }

    pub fn show_password_toggle(mut self, show: bool) -> Self {
        self.show_password_toggle = show;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFieldAction {
    None,
    Redraw,
    Changed(String),
    VisibilityChanged { revealed: bool },
}

#[derive(Clone, Debug)]
pub struct InputFieldBindings {
    pub clear: Vec<KeyEvent>,
    pub toggle_visibility: Vec<KeyEvent>,
}

impl Default for InputFieldBindings {
    fn default() -> Self {
        Self {
            clear: vec![keymap::key_ctrl('u')],
            toggle_visibility: vec![keymap::key_ctrl('t')],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decoration {
    Busy,
    Clear,
    Visibility,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FieldLayout {
    label: Option<Rect>,
    field: Rect,
    text: Rect,
    decorations: Vec<(Decoration, u16)>,
    description: Option<Rect>,
}

type ChangeCallback = Box<dyn FnMut(&str)>;

/// Single-line labeled text input.
///
/// The value shown is owned locally but the caller stays the source of truth: every
/// [`InputField::set_value`] replaces it. Edits update the local value first, then report
/// [`InputFieldAction::Changed`] and call the `on_change` callback.
pub struct InputField {
    props: InputFieldProps,
    bindings: InputFieldBindings,
    value: String,
    /// Char index.
    cursor: usize,
    /// Display columns scrolled off the left edge.
    scroll_x: usize,
    revealed: bool,
    focused: bool,
    on_change: Option<ChangeCallback>,
    last_area: Option<Rect>,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new(InputFieldProps::default())
    }
}

impl InputField {
    pub fn new(props: InputFieldProps) -> Self {
        Self {
            props,
            bindings: InputFieldBindings::default(),
            value: String::new(),
            cursor: 0,
            scroll_x: 0,
            revealed: false,
            focused: false,
            on_change: None,
            last_area: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn with_bindings(mut self, bindings: InputFieldBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn props(&self) -> &InputFieldProps {
        &self.props
    }

    pub fn set_props(&mut self, props: InputFieldProps) {
        if props.kind != InputKind::Password {
            self.revealed = false;
        }
        self.props = props;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Mirrors an externally owned value. The cursor moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_editable(&self) -> bool {
        !self.props.disabled && !self.props.loading
    }

    pub fn is_obscured(&self) -> bool {
        self.props.kind == InputKind::Password && !self.revealed
    }

    /// Whether the value is flagged for assistive tech as invalid.
    pub fn aria_invalid(&self) -> bool {
        self.props.invalid || self.props.error_message.is_some()
    }

    /// The line under the field: the error message if any, else the helper text.
    pub fn description(&self) -> Option<&str> {
        self.props
            .error_message
            .as_deref()
            .or(self.props.helper_text.as_deref())
    }

    pub fn can_clear(&self) -> bool {
        self.props.show_clear_button
            && !self.value.is_empty()
            && !self.props.loading
            && !self.props.disabled
    }

    pub fn can_toggle_visibility(&self) -> bool {
        self.props.kind == InputKind::Password
            && self.props.show_password_toggle
            && !self.props.loading
    }

    pub fn clear(&mut self) -> InputFieldAction {
        if !self.can_clear() {
            return InputFieldAction::None;
        }
        self.value.clear();
        self.cursor = 0;
        self.scroll_x = 0;
        self.changed()
    }

    pub fn toggle_visibility(&mut self) -> InputFieldAction {
        if !self.can_toggle_visibility() {
            return InputFieldAction::None;
        }
        self.revealed = !self.revealed;
        debug!(revealed = self.revealed, "input visibility toggled");
        InputFieldAction::VisibilityChanged {
            revealed: self.revealed,
        }
    }

    /// Help entries for the shortcuts that apply under the current props.
    pub fn help(&self) -> Vec<Binding> {
        let mut out = Vec::new();
        if self.props.show_clear_button {
            out.push(Binding::new("^u", "clear", self.bindings.clear.clone()));
        }
        if self.props.kind == InputKind::Password && self.props.show_password_toggle {
            out.push(Binding::new(
                "^t",
                "show/hide",
                self.bindings.toggle_visibility.clone(),
            ));
        }
        out
    }

    /// Rows needed to draw the label, the field box and the description.
    pub fn required_height(&self) -> u16 {
        let label = u16::from(self.props.label.is_some());
        let description = u16::from(self.description().is_some());
        label + self.box_height() + description
    }

    /// Terminal cursor position for the last rendered `area`, if the field is editable.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.is_editable() {
            return None;
        }
        let layout = self.layout(area);
        let text = layout.text;
        if text.width == 0 || text.height == 0 {
            return None;
        }
        let x = self.cursor_col().checked_sub(self.scroll_x)?;
        if x >= text.width as usize {
            return None;
        }
        Some((text.x + x as u16, text.y))
    }

    pub fn handle_event(&mut self, event: InputEvent) -> InputFieldAction {
        match event {
            InputEvent::Key(key) => self.handle_key(&key),
            InputEvent::Paste(s) => {
                if !self.is_editable() {
                    return InputFieldAction::None;
                }
                let clean: String = s.chars().filter(|c| !c.is_control()).collect();
                if clean.is_empty() {
                    return InputFieldAction::None;
                }
                self.insert_str(&clean);
                self.changed()
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.last_area = Some(area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = self.layout(area);
        let invalid = self.aria_invalid();
        let disabled = self.props.disabled;

        let base = theme.surface.patch(theme.text_primary);
        buf.set_style(area, base);

        if let (Some(rect), Some(label)) = (layout.label, self.props.label.as_deref()) {
            let mut style = base.add_modifier(Modifier::BOLD);
            if invalid {
                style = style.patch(theme.danger);
            } else if disabled {
                style = style.patch(theme.text_muted);
            }
            render::render_line_aligned(
                rect,
                buf,
                &Line::styled(label.to_string(), style),
                Alignment::Left,
            );
        }

        let border = if invalid {
            theme.danger
        } else if self.focused && !disabled {
            theme.accent
        } else {
            theme.border
        };
        let field = layout.field;
        match self.props.variant {
            InputVariant::Outlined => {
                Block::bordered().border_style(border).render(field, buf);
            }
            InputVariant::Filled => {
                let mut fill = theme.surface_alt;
                if invalid || self.focused {
                    fill = fill
                        .add_modifier(Modifier::UNDERLINED)
                        .underline_color(border.fg.unwrap_or_default());
                }
                buf.set_style(field, fill);
            }
            InputVariant::Ghost => {
                if field.height > 0 {
                    let rule = Rect::new(field.x, field.bottom() - 1, field.width, 1);
                    render::fill(rule, buf, "─", border);
                }
            }
        }

        self.render_value(&layout, buf, theme);
        self.render_decorations(&layout, buf, theme);

        if let (Some(rect), Some(text)) = (layout.description, self.description()) {
            let style = if self.props.error_message.is_some() {
                theme.danger
            } else {
                theme.text_muted
            };
            render::render_line_aligned(
                rect,
                buf,
                &Line::styled(text.to_string(), style),
                Alignment::Left,
            );
        }
    }

    fn changed(&mut self) -> InputFieldAction {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.value);
        }
        InputFieldAction::Changed(self.value.clone())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> InputFieldAction {
        if keymap::any_matches(&self.bindings.toggle_visibility, key) {
            return self.toggle_visibility();
        }
        if keymap::any_matches(&self.bindings.clear, key) {
            return self.clear();
        }
        if !self.is_editable() {
            return InputFieldAction::None;
        }
        match key.code {
            KeyCode::Char(c) if key.is_text() => {
                self.insert_str(c.encode_utf8(&mut [0u8; 4]));
                self.changed()
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputFieldAction::None;
                }
                self.cursor -= 1;
                let at = byte_index_from_char_index(&self.value, self.cursor);
                self.value.remove(at);
                self.changed()
            }
            KeyCode::Delete => {
                if self.cursor >= self.value.chars().count() {
                    return InputFieldAction::None;
                }
                let at = byte_index_from_char_index(&self.value, self.cursor);
                self.value.remove(at);
                self.changed()
            }
            KeyCode::Left => self.move_cursor_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor_to(self.cursor + 1),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(usize::MAX),
            _ => InputFieldAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> InputFieldAction {
        let Some(area) = self.last_area else {
            return InputFieldAction::None;
        };
        let layout = self.layout(area);
        if !mouse.is_left_click_in(layout.field) {
            return InputFieldAction::None;
        }
        let hit = layout
            .decorations
            .iter()
            .find(|(_, x)| *x == mouse.x && mouse.y == layout.text.y)
            .map(|(d, _)| *d);
        match hit {
            Some(Decoration::Clear) => return self.clear(),
            Some(Decoration::Visibility) => return self.toggle_visibility(),
            Some(Decoration::Busy) => return InputFieldAction::None,
            None => {}
        }
        if !self.is_editable() {
            return InputFieldAction::None;
        }
        let mut action = InputFieldAction::None;
        if !self.focused {
            self.focused = true;
            action = InputFieldAction::Redraw;
        }
        if layout.text.contains(mouse.position()) {
            let target = self.scroll_x + (mouse.x - layout.text.x) as usize;
            let col = col_from_display_x(&self.display_text(), target);
            if let InputFieldAction::Redraw = self.move_cursor_to(col) {
                action = InputFieldAction::Redraw;
            }
        }
        action
    }

    fn move_cursor_to(&mut self, pos: usize) -> InputFieldAction {
        let pos = pos.min(self.value.chars().count());
        if pos == self.cursor {
            return InputFieldAction::None;
        }
        self.cursor = pos;
        InputFieldAction::Redraw
    }

    fn insert_str(&mut self, s: &str) {
        let at = byte_index_from_char_index(&self.value, self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    fn display_text(&self) -> Cow<'_, str> {
        if self.is_obscured() {
            Cow::Owned(std::iter::repeat_n(MASK_CHAR, self.value.chars().count()).collect())
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    fn cursor_col(&self) -> usize {
        if self.is_obscured() {
            return self.cursor;
        }
        let at = byte_index_from_char_index(&self.value, self.cursor);
        self.value[..at].width()
    }

    fn box_height(&self) -> u16 {
        let inner = self.props.size.inner_height();
        match self.props.variant {
            InputVariant::Outlined => inner + 2,
            InputVariant::Filled => inner,
            InputVariant::Ghost => inner + 1,
        }
    }

    fn decorations(&self) -> Vec<Decoration> {
        let mut out = Vec::new();
        if self.props.loading {
            out.push(Decoration::Busy);
        }
        if self.can_clear() {
            out.push(Decoration::Clear);
        }
        if self.can_toggle_visibility() {
            out.push(Decoration::Visibility);
        }
        out
    }

    fn layout(&self, area: Rect) -> FieldLayout {
        let bottom = area.bottom();
        let mut y = area.y;

        let label = if self.props.label.is_some() && y < bottom {
            y += 1;
            Some(Rect::new(area.x, y - 1, area.width, 1))
        } else {
            None
        };

        let box_h = self.box_height().min(bottom - y);
        let field = Rect::new(area.x, y, area.width, box_h);
        y += box_h;

        let description = if self.description().is_some() && y < bottom {
            Some(Rect::new(area.x, y, area.width, 1))
        } else {
            None
        };

        let inner = match self.props.variant {
            InputVariant::Outlined => field.inner(Margin::new(1, 1)),
            InputVariant::Filled => field,
            InputVariant::Ghost => Rect::new(
                field.x,
                field.y,
                field.width,
                field.height.saturating_sub(1),
            ),
        };
        let vpad = u16::from(self.props.size == InputSize::Lg);
        let hpad = self.props.size.padding();
        let row = Rect::new(
            inner.x + hpad.min(inner.width),
            inner.y + vpad.min(inner.height),
            inner.width.saturating_sub(hpad * 2),
            inner.height.saturating_sub(vpad).min(1),
        );

        let mut decorations = Vec::new();
        let mut text_w = row.width;
        for (i, d) in self.decorations().into_iter().enumerate() {
            let offset = 1 + 2 * i as u16;
            if offset > row.width {
                break;
            }
            decorations.push((d, row.right() - offset));
            text_w = row.width.saturating_sub(offset + 1);
        }

        FieldLayout {
            label,
            field,
            text: Rect::new(row.x, row.y, text_w, row.height),
            decorations,
            description,
        }
    }

    fn render_value(&mut self, layout: &FieldLayout, buf: &mut Buffer, theme: &Theme) {
        let text = layout.text;
        if text.width == 0 || text.height == 0 {
            return;
        }
        let width = text.width as usize;
        let cursor_col = self.cursor_col();
        if cursor_col < self.scroll_x {
            self.scroll_x = cursor_col;
        } else if cursor_col >= self.scroll_x + width {
            self.scroll_x = cursor_col + 1 - width;
        }

        let muted = self.props.disabled || self.props.loading;
        let (content, style) = if self.value.is_empty() {
            (
                render::truncate_to_width(&self.props.placeholder, width),
                theme.text_muted,
            )
        } else {
            let style = if muted {
                theme.text_muted
            } else {
                theme.text_primary
            };
            (slice_cols(&self.display_text(), self.scroll_x, width), style)
        };
        buf.set_stringn(text.x, text.y, content, width, style);
    }

    fn render_decorations(&self, layout: &FieldLayout, buf: &mut Buffer, theme: &Theme) {
        for &(decoration, x) in &layout.decorations {
            let (glyph, style) = match decoration {
                Decoration::Busy => (BUSY_GLYPH, theme.accent),
                Decoration::Clear => (CLEAR_GLYPH, theme.text_muted),
                Decoration::Visibility if self.revealed => (HIDE_GLYPH, theme.text_muted),
                Decoration::Visibility => (SHOW_GLYPH, theme.text_muted),
            };
            buf.set_stringn(x, layout.text.y, glyph, 1, style);
        }
    }
}

fn slice_cols(s: &str, skip: usize, max: usize) -> String {
    let mut out = String::new();
    let mut x = 0usize;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if x < skip {
            x += w;
            continue;
        }
        if x + w > skip + max {
            break;
        }
        out.push(ch);
        x += w;
    }
    out
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctrl(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl()))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn rendered(field: &mut InputField, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, field.required_height());
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &Theme::default());
        (0..area.height).map(|y| row_text(&buf, y)).collect()
    }

    #[test]
    fn typing_reports_each_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut field =
            InputField::default().on_change(move |v| sink.borrow_mut().push(v.to_string()));
        assert_eq!(
            field.handle_event(InputEvent::char('h')),
            InputFieldAction::Changed("h".into())
        );
        field.handle_event(InputEvent::char('i'));
        field.handle_event(InputEvent::key(KeyCode::Left));
        field.handle_event(InputEvent::key(KeyCode::Backspace));
        assert_eq!(field.value(), "i");
        assert_eq!(*seen.borrow(), vec!["h", "hi", "i"]);
    }

    #[test]
    fn set_value_replaces_and_moves_cursor_to_end() {
        let mut field = InputField::default().with_value("héllo");
        assert_eq!(field.cursor(), 5);
        field.handle_event(InputEvent::key(KeyCode::Home));
        field.handle_event(InputEvent::key(KeyCode::Delete));
        assert_eq!(field.value(), "éllo");
        field.set_value("abc");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn clearing_empties_value_and_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut field = InputField::new(InputFieldProps::new().show_clear_button(true))
            .with_value("hello")
            .on_change(move |v| sink.borrow_mut().push(v.to_string()));
        assert_eq!(field.clear(), InputFieldAction::Changed(String::new()));
        assert_eq!(field.value(), "");
        assert_eq!(*seen.borrow(), vec![""]);
        assert_eq!(field.clear(), InputFieldAction::None);
    }

    #[test]
    fn clear_requires_button_and_idle_field() {
        let mut field = InputField::default().with_value("hello");
        assert_eq!(field.handle_event(ctrl('u')), InputFieldAction::None);
        field.set_props(InputFieldProps::new().show_clear_button(true).loading(true));
        assert_eq!(field.clear(), InputFieldAction::None);
        field.set_props(InputFieldProps::new().show_clear_button(true));
        assert_eq!(
            field.handle_event(ctrl('u')),
            InputFieldAction::Changed(String::new())
        );
    }

    #[test]
    fn visibility_toggle_round_trips() {
        let props = InputFieldProps::new()
            .kind(InputKind::Password)
            .show_password_toggle(true);
        let mut field = InputField::new(props).with_value("secret");
        assert!(field.is_obscured());
        assert_eq!(
            field.handle_event(ctrl('t')),
            InputFieldAction::VisibilityChanged { revealed: true }
        );
        assert!(!field.is_obscured());
        field.toggle_visibility();
        assert!(field.is_obscured());
        assert_eq!(field.value(), "secret");
    }

    #[test]
    fn password_renders_masked() {
        let props = InputFieldProps::new()
            .label("Password")
            .kind(InputKind::Password)
            .show_password_toggle(true);
        let mut field = InputField::new(props).with_value("abc");
        let lines = rendered(&mut field, 20);
        assert_eq!(lines[0].trim_end(), "Password");
        assert!(lines[2].contains("│ •••"), "{:?}", lines[2]);
        assert!(lines[2].contains(SHOW_GLYPH));
        field.toggle_visibility();
        let lines = rendered(&mut field, 20);
        assert!(lines[2].contains("abc"));
        assert!(lines[2].contains(HIDE_GLYPH));
    }

    #[test]
    fn loading_blocks_editing_and_hides_controls() {
        let props = InputFieldProps::new()
            .loading(true)
            .show_clear_button(true)
            .kind(InputKind::Password)
            .show_password_toggle(true);
        let mut field = InputField::new(props).with_value("x");
        assert_eq!(field.handle_event(InputEvent::char('y')), InputFieldAction::None);
        assert_eq!(field.toggle_visibility(), InputFieldAction::None);
        let lines = rendered(&mut field, 16);
        assert!(lines[1].contains(BUSY_GLYPH));
        assert!(!lines[1].contains(CLEAR_GLYPH));
        assert_eq!(field.cursor_pos(Rect::new(0, 0, 16, 3)), None);
    }

    #[test]
    fn error_message_replaces_helper_text() {
        let props = InputFieldProps::new()
            .label("Email")
            .helper_text("We never share it")
            .error_message("Invalid email");
        let mut field = InputField::new(props);
        assert!(field.aria_invalid());
        assert_eq!(field.description(), Some("Invalid email"));
        let lines = rendered(&mut field, 24);
        assert_eq!(lines.last().map(|l| l.trim_end()), Some("Invalid email"));

        let field = InputField::new(InputFieldProps::new().helper_text("hint"));
        assert!(!field.aria_invalid());
        assert_eq!(field.description(), Some("hint"));
    }

    #[test]
    fn height_follows_variant_and_size() {
        let field = |p: InputFieldProps| InputField::new(p).required_height();
        assert_eq!(field(InputFieldProps::new().label("L").helper_text("h")), 5);
        assert_eq!(
            field(
                InputFieldProps::new()
                    .variant(InputVariant::Filled)
                    .size(InputSize::Sm)
            ),
            1
        );
        assert_eq!(field(InputFieldProps::new().variant(InputVariant::Ghost)), 2);
        assert_eq!(field(InputFieldProps::new().size(InputSize::Lg)), 5);
    }

    #[test]
    fn placeholder_shows_when_empty() {
        let mut field = InputField::new(
            InputFieldProps::new()
                .variant(InputVariant::Filled)
                .placeholder("Search..."),
        );
        let lines = rendered(&mut field, 20);
        assert_eq!(lines[0].trim(), "Search...");
    }

    #[test]
    fn clicking_clear_glyph_clears() {
        let props = InputFieldProps::new().show_clear_button(true);
        let mut field = InputField::new(props).with_value("query");
        let lines = rendered(&mut field, 20);
        let x = lines[1]
            .chars()
            .position(|c| c.to_string() == CLEAR_GLYPH)
            .unwrap_or_default() as u16;
        assert_eq!(
            field.handle_event(InputEvent::click(x, 1)),
            InputFieldAction::Changed(String::new())
        );
    }

    #[test]
    fn cursor_tracks_typing_and_scrolls() {
        let mut field = InputField::default();
        let area = Rect::new(0, 0, 8, 3);
        for c in "abcdefghij".chars() {
            field.handle_event(InputEvent::char(c));
        }
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &Theme::default());
        // Border plus padding leaves 4 text columns.
        assert_eq!(row_text(&buf, 1), "│ hij  │");
        assert_eq!(field.cursor_pos(area), Some((5, 1)));
    }
}
