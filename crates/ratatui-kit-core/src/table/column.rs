use super::value::CellValue;
use ratatui::layout::Alignment;
use ratatui::text::Line;
use std::fmt;

type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;
type CellRenderer<T> = Box<dyn Fn(&CellValue, &T, usize) -> Line<'static>>;

/// Describes how one field of `T` is displayed and sorted.
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// Fixed width in cells. Columns without one share the leftover space.
    pub width: Option<u16>,
    pub align: Alignment,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            width: None,
            align: Alignment::Left,
            accessor: Box::new(accessor),
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Custom cell content: `(value, row, display index) -> line`.
    pub fn render_with(
        mut self,
        render: impl Fn(&CellValue, &T, usize) -> Line<'static> + 'static,
    ) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    pub fn cell_line(&self, row: &T, index: usize) -> Line<'static> {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => Line::from(value.display().into_owned()),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

/// Splits `total` cells between columns, leaving `gap` cells between neighbours.
///
/// Fixed widths are honoured first (in order, until space runs out). The remainder is shared
/// evenly by flexible columns with the first ones absorbing any odd cells.
pub fn column_widths(total: u16, fixed_widths: &[Option<u16>], gap: u16) -> Vec<u16> {
    if fixed_widths.is_empty() {
        return Vec::new();
    }
    let gaps = gap.saturating_mul(fixed_widths.len().saturating_sub(1) as u16);
    let mut remaining = total.saturating_sub(gaps);

    let mut widths: Vec<u16> = vec![0; fixed_widths.len()];
    for (w, hint) in widths.iter_mut().zip(fixed_widths) {
        if let Some(fixed) = hint {
            *w = (*fixed).min(remaining);
            remaining -= *w;
        }
    }

    let flex = fixed_widths.iter().filter(|s| s.is_none()).count() as u16;
    if flex > 0 {
        let share = remaining / flex;
        let mut extra = remaining % flex;
        for (w, hint) in widths.iter_mut().zip(fixed_widths) {
            if hint.is_none() {
                *w = share + u16::from(extra > 0);
                extra = extra.saturating_sub(1);
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_then_flexible_share() {
        assert_eq!(column_widths(30, &[Some(4), None, None], 1), vec![4, 12, 12]);
        assert_eq!(column_widths(31, &[Some(4), None, None], 1), vec![4, 13, 12]);
    }

    #[test]
    fn fixed_widths_clamp_when_narrow() {
        assert_eq!(column_widths(6, &[Some(4), Some(4)], 1), vec![4, 1]);
        assert_eq!(column_widths(0, &[None, Some(3)], 1), vec![0, 0]);
    }

    #[test]
    fn default_renderer_uses_display_text() {
        struct Row {
            n: Option<i64>,
        }
        let col: Column<Row> = Column::new("n", "N", |r: &Row| r.n.into());
        assert_eq!(col.cell_line(&Row { n: None }, 0).to_string(), "-");
        assert_eq!(col.cell_line(&Row { n: Some(7) }, 0).to_string(), "7");

        let col = col.render_with(|v, _, i| Line::from(format!("#{i}:{}", v.display())));
        assert_eq!(col.cell_line(&Row { n: Some(7) }, 2).to_string(), "#2:7");
    }
}
