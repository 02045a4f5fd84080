use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::text::Span;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub separator: String,
    pub space: String,
    pub align: Alignment,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            separator: " • ".to_string(),
            space: " ".to_string(),
            align: Alignment::Left,
        }
    }
}

/// One-line summary of the active key bindings, truncated with an ellipsis when narrow.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(row, theme.surface.patch(theme.text_muted));
        render::render_line_aligned(row, buf, &self.to_line(theme), self.options.align);
    }

    fn to_line(&self, theme: &Theme) -> Line<'static> {
        let text = theme.text_muted;
        let key = theme.text_primary.add_modifier(Modifier::BOLD);
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.options.separator.clone(), text));
            }
            spans.push(Span::styled(b.help_key.clone(), key));
            spans.push(Span::styled(self.options.space.clone(), text));
            spans.push(Span::styled(b.help_desc.clone(), text));
        }
        Line::from(spans)
    }
}
