use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

pub const ELLIPSIS: &str = "…";

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            "│"
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Fills `area` with `symbol` in `style`.
pub fn fill(area: Rect, buf: &mut Buffer, symbol: &str, style: Style) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

/// Cuts `input` down to `max_cols` display columns, ending in [`ELLIPSIS`] when anything was
/// dropped.
pub fn truncate_to_width(input: &str, max_cols: usize) -> String {
    if UnicodeWidthStr::width(input) <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = take_cols(input, max_cols - 1);
    out.push_str(ELLIPSIS);
    out
}

fn take_cols(input: &str, max_cols: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

/// Span-aware variant of [`truncate_to_width`]. Span styles are preserved.
pub fn truncate_line(line: &Line<'_>, max_cols: usize) -> Line<'static> {
    let owned = |s: &Span<'_>| Span::styled(s.content.to_string(), s.style);
    if line.width() <= max_cols {
        return Line::from(line.spans.iter().map(owned).collect::<Vec<_>>()).style(line.style);
    }
    if max_cols == 0 {
        return Line::default();
    }

    let mut remaining = max_cols - 1;
    let mut out: Vec<Span<'static>> = Vec::with_capacity(line.spans.len() + 1);
    let mut last_style = Style::default();
    for span in &line.spans {
        let w = span.width();
        last_style = span.style;
        if w <= remaining {
            out.push(owned(span));
            remaining -= w;
            continue;
        }
        let cut = take_cols(&span.content, remaining);
        if !cut.is_empty() {
            out.push(Span::styled(cut, span.style));
        }
        break;
    }
    out.push(Span::styled(ELLIPSIS, last_style));
    Line::from(out).style(line.style)
}

/// Draws `line` on the first row of `area`, positioned by `align` and truncated with an ellipsis
/// when it does not fit. Returns the columns actually written.
pub fn render_line_aligned(
    area: Rect,
    buf: &mut Buffer,
    line: &Line<'_>,
    align: Alignment,
) -> u16 {
    if area.width == 0 || area.height == 0 {
        return 0;
    }
    let line = truncate_line(line, area.width as usize);
    let w = (line.width() as u16).min(area.width);
    let offset = match align {
        Alignment::Left => 0,
        Alignment::Center => (area.width - w) / 2,
        Alignment::Right => area.width - w,
    };
    buf.set_line(area.x + offset, area.y, &line, area.width - offset);
    w
}
