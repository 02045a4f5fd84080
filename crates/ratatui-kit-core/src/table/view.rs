use super::column::Column;
use super::column::column_widths;
use super::selection::CheckState;
use super::selection::RowIdentity;
use super::selection::RowSelection;
use super::selection::SelectionMode;
use super::sort::SortDirection;
use super::sort::SortState;
use super::sort::sorted_order;
use super::value::CellValue;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use tracing::debug;

pub const DEFAULT_EMPTY_TEXT: &str = "No data available";

const CHECKBOX_WIDTH: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    SortChanged(SortState),
    SelectionChanged,
}

/// Which of the three bodies [`DataTable::render`] draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Loading,
    Empty,
    Populated,
}

#[derive(Clone, Debug)]
pub struct DataTableOptions {
    pub show_scrollbar: bool,
    pub skeleton_rows: usize,
    pub col_gap: u16,
    /// Heading drawn above the caller's empty text.
    pub empty_title: String,
    pub header_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub scrollbar_style: Style,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            skeleton_rows: 3,
            col_gap: 1,
            empty_title: DEFAULT_EMPTY_TEXT.to_string(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default(),
            selected_style: Style::default(),
            scrollbar_style: Style::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
    pub prev_column: Vec<KeyEvent>,
    pub next_column: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub toggle_row: Vec<KeyEvent>,
    pub toggle_all: Vec<KeyEvent>,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            page_up: vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            bottom: vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            prev_column: vec![keymap::key(KeyCode::Left), keymap::key_char('h')],
            next_column: vec![keymap::key(KeyCode::Right), keymap::key_char('l')],
            sort: vec![keymap::key(KeyCode::Enter), keymap::key_char('s')],
            toggle_row: vec![keymap::key_char(' ')],
            toggle_all: vec![keymap::key_char('a')],
        }
    }
}

impl TableBindings {
    /// Entries for a [`crate::help::HelpBar`].
    pub fn help(&self, mode: SelectionMode) -> Vec<Binding> {
        let mut out = vec![
            Binding::new("↑↓", "move", [self.up.clone(), self.down.clone()].concat()),
            Binding::new(
                "←→",
                "column",
                [self.prev_column.clone(), self.next_column.clone()].concat(),
            ),
            Binding::new("s", "sort", self.sort.clone()),
        ];
        if mode.is_selectable() {
            out.push(Binding::new("space", "select", self.toggle_row.clone()));
        }
        if mode == SelectionMode::Multiple {
            out.push(Binding::new("a", "select all", self.toggle_all.clone()));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnSpan {
    x: u16,
    width: u16,
}

/// Geometry of the last populated render, used for mouse hit-testing.
#[derive(Clone, Debug, Default)]
struct TableLayout {
    header: Rect,
    body: Rect,
    checkbox: Option<ColumnSpan>,
    columns: Vec<ColumnSpan>,
    scrollbar_x: Option<u16>,
}

type RowStyleFn<T> = Box<dyn Fn(&T, usize) -> Style>;
type SelectionCallback<T> = Box<dyn FnMut(&[&T])>;

/// A sortable table over caller-owned rows with optional row selection.
///
/// Rows and columns are replaced wholesale through [`DataTable::set_rows`] and
/// [`DataTable::set_columns`]. The table owns only the sort, the selection, the cursor and the
/// scroll position. Selection changes are reported through the returned [`TableAction`] and,
/// if installed, the [`DataTable::on_selection_change`] callback with the full selection in row
/// input order.
pub struct DataTable<T> {
    pub state: ViewportState,
    options: DataTableOptions,
    bindings: TableBindings,
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    loading: bool,
    mode: SelectionMode,
    empty_text: String,
    row_style: Option<RowStyleFn<T>>,
    identity: RowIdentity<T>,
    on_selection_change: Option<SelectionCallback<T>>,
    sort: Option<SortState>,
    order: Vec<usize>,
    selection: RowSelection,
    cursor: Option<usize>,
    focused_col: usize,
    layout: Option<TableLayout>,
}

impl<T: PartialEq + 'static> DataTable<T> {
    /// A table whose rows are matched by value equality.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self::with_identity(columns, RowIdentity::by_value())
    }
}

impl<T> DataTable<T> {
    pub fn with_identity(columns: Vec<Column<T>>, identity: RowIdentity<T>) -> Self {
        Self {
            state: ViewportState::default(),
            options: DataTableOptions::default(),
            bindings: TableBindings::default(),
            rows: Vec::new(),
            columns,
            loading: false,
            mode: SelectionMode::None,
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            row_style: None,
            identity,
            on_selection_change: None,
            sort: None,
            order: Vec::new(),
            selection: RowSelection::default(),
            cursor: None,
            focused_col: 0,
            layout: None,
        }
    }

    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Extra style per row, patched over the selected style: `(row, display index) -> style`.
    pub fn row_style(mut self, f: impl Fn(&T, usize) -> Style + 'static) -> Self {
        self.row_style = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&[&T]) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn with_options(mut self, options: DataTableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_bindings(mut self, bindings: TableBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    pub fn bindings(&self) -> &TableBindings {
        &self.bindings
    }

    pub fn row_data(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_empty_text(&mut self, text: impl Into<String>) {
        self.empty_text = text.into();
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the selection mode, trimming a selection the new mode cannot hold.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> TableAction {
        self.mode = mode;
        let must_clear = match mode {
            SelectionMode::None => !self.selection.is_empty(),
            SelectionMode::Single => self.selection.len() > 1,
            SelectionMode::Multiple => false,
        };
        if must_clear {
            self.selection.clear();
            self.selection_changed()
        } else {
            TableAction::Redraw
        }
    }

    /// Replaces the rows.
    ///
    /// The active sort is re-applied and the selection is carried over for rows the identity
    /// function still finds. If rows dropped out of the selection this reports
    /// [`TableAction::SelectionChanged`] and notifies the callback.
    pub fn set_rows(&mut self, rows: Vec<T>) -> TableAction {
        let cursor_row = self.cursor_row();
        let remapped = self.selection.remap(&self.rows, &rows, &self.identity);
        let shrank = remapped.len() < self.selection.len();

        let cursor_target = cursor_row.and_then(|old| {
            let old = self.rows.get(old)?;
            rows.iter().position(|new| self.identity.same(old, new))
        });

        self.rows = rows;
        self.selection = remapped;
        self.layout = None;
        self.resort(cursor_target);

        if shrank {
            debug!(
                selected = self.selection.len(),
                "selection shrank after rows were replaced"
            );
            self.selection_changed()
        } else {
            TableAction::Redraw
        }
    }

    /// Replaces the columns. A sort on a column that vanished or is no longer sortable is
    /// dropped.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.columns = columns;
        // Hit-testing waits for the next render to see the new columns.
        self.layout = None;
        let sort_still_valid = self.sort.as_ref().is_some_and(|s| {
            self.columns
                .iter()
                .any(|c| c.key == s.column && c.sortable)
        });
        if !sort_still_valid {
            self.sort = None;
        }
        self.focused_col = self.focused_col.min(self.columns.len().saturating_sub(1));
        let cursor_row = self.cursor_row();
        self.resort(cursor_row);
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.loading {
            RenderMode::Loading
        } else if self.rows.is_empty() {
            RenderMode::Empty
        } else {
            RenderMode::Populated
        }
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Row indices in display order.
    pub fn sorted_indices(&self) -> &[usize] {
        &self.order
    }

    /// Rows in display order.
    pub fn sorted_rows(&self) -> Vec<&T> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.iter().collect()
    }

    /// The full selection in row input order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.selection
            .iter()
            .filter_map(|i| self.rows.get(i))
            .collect()
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selection.contains(row)
    }

    pub fn header_check_state(&self) -> CheckState {
        self.selection.check_state(self.rows.len())
    }

    /// Input index of the row under the cursor.
    pub fn cursor_row(&self) -> Option<usize> {
        self.cursor.and_then(|p| self.order.get(p).copied())
    }

    /// Cursor position in display order.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn focused_column(&self) -> Option<&Column<T>> {
        self.columns.get(self.focused_col)
    }

    /// Header click on `key`. Unknown or unsortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> TableAction {
        let Some(col_idx) = self.columns.iter().position(|c| c.key == key) else {
            return TableAction::None;
        };
        if !self.columns[col_idx].sortable {
            return TableAction::None;
        }
        let next = SortState::after_click(self.sort.as_ref(), key);
        debug!(column = %next.column, direction = ?next.direction, "table sort changed");
        self.sort = Some(next.clone());
        self.focused_col = col_idx;
        let cursor_row = self.cursor_row();
        self.resort(cursor_row);
        TableAction::SortChanged(next)
    }

    /// Toggles selection of row `row` (an index into the rows as supplied).
    pub fn toggle_row_selection(&mut self, row: usize) -> TableAction {
        if self.selection.toggle(self.mode, row, self.rows.len()) {
            debug!(row, selected = self.selection.len(), "row selection toggled");
            self.selection_changed()
        } else {
            TableAction::None
        }
    }

    /// Select-all checkbox. Only has an effect in [`SelectionMode::Multiple`].
    pub fn toggle_select_all(&mut self) -> TableAction {
        if self.selection.toggle_all(self.mode, self.rows.len()) {
            debug!(selected = self.selection.len(), "select-all toggled");
            self.selection_changed()
        } else {
            TableAction::None
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        if self.render_mode() != RenderMode::Populated {
            return TableAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(&key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(_) => TableAction::None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.render_mode() {
            RenderMode::Loading => {
                self.layout = None;
                self.render_loading(area, buf, theme);
            }
            RenderMode::Empty => {
                self.layout = None;
                self.render_empty(area, buf, theme);
            }
            RenderMode::Populated => self.render_populated(area, buf, theme),
        }
    }

    fn selection_changed(&mut self) -> TableAction {
        if let Some(callback) = self.on_selection_change.as_mut() {
            let selected: Vec<&T> = self
                .selection
                .iter()
                .filter_map(|i| self.rows.get(i))
                .collect();
            callback(&selected);
        }
        TableAction::SelectionChanged
    }

    fn resort(&mut self, keep_row: Option<usize>) {
        let column = self
            .sort
            .as_ref()
            .and_then(|s| self.columns.iter().find(|c| c.key == s.column).map(|c| (c, s)));
        self.order = match column {
            Some((col, sort)) => {
                let keys: Vec<CellValue> = self.rows.iter().map(|r| col.value(r)).collect();
                sorted_order(&keys, sort.direction)
            }
            None => (0..self.rows.len()).collect(),
        };

        self.cursor = if self.rows.is_empty() {
            None
        } else {
            keep_row
                .and_then(|row| self.order.iter().position(|&i| i == row))
                .or_else(|| self.cursor.map(|c| c.min(self.rows.len() - 1)))
        };
        self.state
            .set_content(self.state.content_w, self.rows.len() as u32);
        if let Some(c) = self.cursor {
            self.state.ensure_row_visible(c as u32);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> TableAction {
        let b = &self.bindings;
        if keymap::any_matches(&b.up, key) {
            return self.move_cursor_by(-1);
        }
        if keymap::any_matches(&b.down, key) {
            return self.move_cursor_by(1);
        }
        if keymap::any_matches(&b.page_up, key) {
            let page = self.state.page_size() as i64;
            return self.move_cursor_by(-page);
        }
        if keymap::any_matches(&b.page_down, key) {
            let page = self.state.page_size() as i64;
            return self.move_cursor_by(page);
        }
        if keymap::any_matches(&b.top, key) {
            if self.rows.is_empty() {
                return TableAction::None;
            }
            self.state.to_top();
            self.set_cursor(0);
            return TableAction::Redraw;
        }
        if keymap::any_matches(&b.bottom, key) {
            if self.rows.is_empty() {
                return TableAction::None;
            }
            self.state.to_bottom();
            self.set_cursor(self.rows.len() - 1);
            return TableAction::Redraw;
        }
        if keymap::any_matches(&b.prev_column, key) {
            return self.move_focus_by(-1);
        }
        if keymap::any_matches(&b.next_column, key) {
            return self.move_focus_by(1);
        }
        if keymap::any_matches(&b.sort, key) {
            let Some(key) = self.focused_column().map(|c| c.key.clone()) else {
                return TableAction::None;
            };
            return self.toggle_sort(&key);
        }
        if keymap::any_matches(&b.toggle_row, key) {
            return match self.cursor_row() {
                Some(row) => self.toggle_row_selection(row),
                None => TableAction::None,
            };
        }
        if keymap::any_matches(&b.toggle_all, key) {
            return self.toggle_select_all();
        }
        TableAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> TableAction {
        let Some(layout) = self.layout.clone() else {
            return TableAction::None;
        };
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                if !self.state.is_scrollable_y() =>
            {
                TableAction::None
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-1);
                TableAction::Redraw
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(1);
                TableAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.header.contains(mouse.position()) {
                    return self.click_header(&layout, mouse.x);
                }
                if layout.body.contains(mouse.position()) {
                    if layout.scrollbar_x == Some(mouse.x) {
                        return TableAction::None;
                    }
                    let pos = self.state.y as usize + (mouse.y - layout.body.y) as usize;
                    return self.click_row(pos);
                }
                TableAction::None
            }
            _ => TableAction::None,
        }
    }

    fn click_header(&mut self, layout: &TableLayout, x: u16) -> TableAction {
        let hit = |span: &ColumnSpan| x >= span.x && x < span.x + span.width;
        if layout.checkbox.as_ref().is_some_and(hit) {
            return self.toggle_select_all();
        }
        let Some(col_idx) = layout.columns.iter().position(hit) else {
            return TableAction::None;
        };
        let Some(key) = self.columns.get(col_idx).map(|c| c.key.clone()) else {
            return TableAction::None;
        };
        self.focused_col = col_idx;
        match self.toggle_sort(&key) {
            TableAction::None => TableAction::Redraw,
            other => other,
        }
    }

    fn click_row(&mut self, pos: usize) -> TableAction {
        let Some(&row) = self.order.get(pos) else {
            return TableAction::None;
        };
        self.cursor = Some(pos);
        if self.mode.is_selectable() {
            self.toggle_row_selection(row)
        } else {
            TableAction::Redraw
        }
    }

    fn move_cursor_by(&mut self, delta: i64) -> TableAction {
        let last = self.rows.len().saturating_sub(1) as i64;
        let cur = self.cursor.map(|c| c as i64).unwrap_or(-1);
        let next = (cur + delta).clamp(0, last) as usize;
        self.set_cursor(next)
    }

    fn set_cursor(&mut self, pos: usize) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        let pos = pos.min(self.rows.len() - 1);
        if self.cursor == Some(pos) {
            return TableAction::None;
        }
        self.cursor = Some(pos);
        self.state.ensure_row_visible(pos as u32);
        TableAction::Redraw
    }

    fn move_focus_by(&mut self, delta: i64) -> TableAction {
        if self.columns.is_empty() {
            return TableAction::None;
        }
        let last = self.columns.len() as i64 - 1;
        let next = (self.focused_col as i64 + delta).clamp(0, last) as usize;
        if next == self.focused_col {
            return TableAction::None;
        }
        self.focused_col = next;
        TableAction::Redraw
    }

    fn compute_layout(&self, area: Rect, reserve_scrollbar: bool) -> TableLayout {
        let (content, scrollbar_x) = if reserve_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let gap = self.options.col_gap;
        let mut x = content.x;
        let mut width = content.width;
        let checkbox = if self.mode.is_selectable() && width > CHECKBOX_WIDTH {
            let span = ColumnSpan {
                x,
                width: CHECKBOX_WIDTH,
            };
            let used = (CHECKBOX_WIDTH + gap).min(width);
            x += used;
            width -= used;
            Some(span)
        } else {
            None
        };

        let fixed_widths: Vec<Option<u16>> = self.columns.iter().map(|c| c.width).collect();
        let mut columns = Vec::with_capacity(fixed_widths.len());
        for w in column_widths(width, &fixed_widths, gap) {
            columns.push(ColumnSpan { x, width: w });
            x = x.saturating_add(w + gap);
        }

        let header_h = 1.min(content.height);
        TableLayout {
            header: Rect::new(content.x, content.y, content.width, header_h),
            body: Rect::new(
                content.x,
                content.y + header_h,
                area.width,
                content.height - header_h,
            ),
            checkbox,
            columns,
            scrollbar_x,
        }
    }

    fn render_populated(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let layout = self.compute_layout(area, self.options.show_scrollbar);
        let base = theme.surface.patch(theme.text_primary);
        buf.set_style(area, base);

        self.state
            .set_viewport(layout.body.width, layout.body.height);
        self.state
            .set_content(layout.body.width as u32, self.rows.len() as u32);

        self.render_header(&layout, buf, theme);
        self.render_body(&layout, buf, theme, base);

        if let Some(sb_x) = layout.scrollbar_x {
            let style = if self.options.scrollbar_style == Style::default() {
                theme.border
            } else {
                self.options.scrollbar_style
            };
            render::render_scrollbar(
                Rect::new(sb_x, layout.body.y, 1, layout.body.height),
                buf,
                &self.state,
                style,
            );
        }
        self.layout = Some(layout);
    }

    fn render_header(&self, layout: &TableLayout, buf: &mut Buffer, theme: &Theme) {
        if layout.header.height == 0 {
            return;
        }
        let style = theme.surface_alt.patch(self.options.header_style);
        buf.set_style(layout.header, style);
        let y = layout.header.y;

        if let Some(cb) = layout.checkbox {
            let symbol = if self.mode == SelectionMode::Multiple {
                self.header_check_state().symbol()
            } else {
                "   "
            };
            buf.set_stringn(cb.x, y, symbol, cb.width as usize, style);
        }

        for (idx, (col, span)) in self.columns.iter().zip(&layout.columns).enumerate() {
            if span.width == 0 {
                continue;
            }
            let mut title_style = style;
            if idx == self.focused_col {
                title_style = title_style.add_modifier(Modifier::UNDERLINED);
            }
            let mut spans = vec![Span::styled(col.title.clone(), title_style)];
            match self.sort.as_ref().filter(|s| s.column == col.key) {
                Some(sort) => {
                    let arrow = match sort.direction {
                        SortDirection::Ascending => " ▲",
                        SortDirection::Descending => " ▼",
                    };
                    spans.push(Span::styled(arrow, style.patch(theme.accent)));
                }
                None if col.sortable => {
                    spans.push(Span::styled(" ↕", style.patch(theme.text_muted)));
                }
                None => {}
            }
            render::render_line_aligned(
                Rect::new(span.x, y, span.width, 1),
                buf,
                &Line::from(spans),
                col.align,
            );
        }
        self.render_separators(layout, layout.header, buf, theme.border);
    }

    fn render_body(&self, layout: &TableLayout, buf: &mut Buffer, theme: &Theme, base: Style) {
        let body = layout.body;
        let selected_style = theme.selected.patch(self.options.selected_style);
        let cursor_style = theme.cursor.patch(self.options.cursor_style);
        let width = match layout.scrollbar_x {
            Some(_) => body.width.saturating_sub(1),
            None => body.width,
        };

        for dy in 0..body.height {
            let pos = self.state.y as usize + dy as usize;
            let Some(&row_idx) = self.order.get(pos) else {
                break;
            };
            let row = &self.rows[row_idx];
            let y = body.y + dy;
            let row_rect = Rect::new(body.x, y, width, 1);

            let selected = self.selection.contains(row_idx);
            let mut style = base;
            if selected {
                style = style.patch(selected_style);
            }
            if let Some(f) = &self.row_style {
                style = style.patch(f(row, pos));
            }
            if self.cursor == Some(pos) {
                style = style.patch(cursor_style);
            }
            buf.set_style(row_rect, style);

            if let Some(cb) = layout.checkbox {
                let symbol = if selected { "[x]" } else { "[ ]" };
                buf.set_stringn(cb.x, y, symbol, cb.width as usize, style);
            }
            for (col, span) in self.columns.iter().zip(&layout.columns) {
                if span.width == 0 {
                    continue;
                }
                let line = col.cell_line(row, pos);
                render::render_line_aligned(
                    Rect::new(span.x, y, span.width, 1),
                    buf,
                    &line,
                    col.align,
                );
            }
            self.render_separators(layout, row_rect, buf, theme.border);
        }
    }

    fn render_separators(&self, layout: &TableLayout, row: Rect, buf: &mut Buffer, style: Style) {
        if self.options.col_gap == 0 {
            return;
        }
        let count = layout.columns.len();
        for span in layout.columns.iter().take(count.saturating_sub(1)) {
            let x = span.x + span.width;
            if x >= row.right() {
                break;
            }
            for y in row.top()..row.bottom() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("│");
                    cell.set_style(style);
                }
            }
        }
    }

    fn render_loading(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let base = theme.surface.patch(theme.text_primary);
        buf.set_style(area, base);
        let layout = self.compute_layout(area, false);
        let skeleton = theme.skeleton;

        let rows = u16::try_from(self.options.skeleton_rows)
            .unwrap_or(u16::MAX)
            .saturating_add(1);
        for dy in 0..rows.min(area.height) {
            let y = area.y + dy;
            if dy == 0 {
                buf.set_style(
                    Rect::new(area.x, y, area.width, 1),
                    theme.surface_alt,
                );
            }
            let cells = layout.checkbox.iter().chain(layout.columns.iter());
            for span in cells {
                let w = span.width.saturating_sub(1).max(1).min(span.width);
                render::fill(Rect::new(span.x, y, w, 1), buf, "▒", skeleton);
            }
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let base = theme.surface_alt.patch(theme.text_primary);
        buf.set_style(area, base);

        let mut lines: Vec<Line<'static>> = Vec::with_capacity(3);
        if area.height >= 4 {
            lines.push(Line::styled("∅", theme.text_muted));
        }
        lines.push(Line::styled(
            self.options.empty_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(self.empty_text.clone(), theme.text_muted));

        let h = (lines.len() as u16).min(area.height);
        let top = area.y + (area.height - h) / 2;
        for (i, line) in lines.iter().take(h as usize).enumerate() {
            render::render_line_aligned(
                Rect::new(area.x, top + i as u16, area.width, 1),
                buf,
                line,
                Alignment::Center,
            );
        }
    }
}
