use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui_kit::input::InputEvent;
use ratatui_kit::input::KeyCode;
use ratatui_kit::input_field::InputField;
use ratatui_kit::input_field::InputFieldAction;
use ratatui_kit::input_field::InputFieldProps;
use ratatui_kit::input_field::InputKind;
use ratatui_kit::preference::FixedAppearance;
use ratatui_kit::preference::MemoryStore;
use ratatui_kit::preference::THEME_KEY;
use ratatui_kit::preference::ThemePreference;
use ratatui_kit::table::CheckState;
use ratatui_kit::table::Column;
use ratatui_kit::table::DataTable;
use ratatui_kit::table::RenderMode;
use ratatui_kit::table::RowIdentity;
use ratatui_kit::table::SelectionMode;
use ratatui_kit::table::TableAction;
use ratatui_kit::theme::Theme;
use ratatui_kit::theme::ThemeMode;
use ratatui_kit::theme_switch::ThemeSwitch;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    name: String,
}

fn row(id: u32, name: &str) -> Row {
    Row {
        id,
        name: name.to_string(),
    }
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID", |r: &Row| r.id.into()).width(4),
        Column::new("name", "Name", |r: &Row| (&r.name).into()).sortable(),
    ]
}

fn screen(table: &mut DataTable<Row>, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    (0..height)
        .map(|y| {
            (0..width)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect::<String>()
        })
        .collect()
}

#[test]
fn header_clicks_sort_then_reverse() {
    let mut table = DataTable::new(columns()).rows(vec![row(1, "Bob"), row(2, "Alice")]);
    let names = |t: &DataTable<Row>| -> Vec<String> {
        t.sorted_rows().iter().map(|r| r.name.clone()).collect()
    };

    table.toggle_sort("name");
    assert_eq!(names(&table), vec!["Alice", "Bob"]);
    table.toggle_sort("name");
    assert_eq!(names(&table), vec!["Bob", "Alice"]);
}

#[test]
fn empty_table_renders_caller_text_verbatim() {
    let mut table = DataTable::new(columns()).empty_text("No users match “beta”");
    assert_eq!(table.render_mode(), RenderMode::Empty);
    let lines = screen(&mut table, 40, 6);
    assert!(
        lines.iter().any(|l| l.trim() == "No users match “beta”"),
        "{lines:#?}"
    );
}

#[test]
fn loading_wins_over_empty() {
    let mut table = DataTable::new(columns())
        .loading(true)
        .empty_text("never shown");
    let lines = screen(&mut table, 30, 6);
    assert!(lines.iter().all(|l| !l.contains("never shown")));
}

#[test]
fn single_selection_replaces_and_toggles_off() {
    let mut table = DataTable::new(columns())
        .rows(vec![row(1, "a"), row(2, "b")])
        .selection_mode(SelectionMode::Single);
    table.toggle_row_selection(0);
    table.toggle_row_selection(1);
    assert_eq!(table.selected_indices(), vec![1]);
    table.toggle_row_selection(1);
    assert!(table.selected_rows().is_empty());
}

#[test]
fn select_all_twice_returns_to_empty() {
    let calls: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = calls.clone();
    let mut table = DataTable::new(columns())
        .rows(vec![row(1, "a"), row(2, "b"), row(3, "c")])
        .selection_mode(SelectionMode::Multiple)
        .on_selection_change(move |rows| sink.borrow_mut().push(rows.len()));

    assert_eq!(table.toggle_select_all(), TableAction::SelectionChanged);
    assert_eq!(table.header_check_state(), CheckState::Checked);
    table.toggle_select_all();
    assert_eq!(table.header_check_state(), CheckState::Unchecked);
    assert_eq!(*calls.borrow(), vec![3, 0]);
}

#[test]
fn selection_survives_resort_and_reports_input_order() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = seen.clone();
    let mut table = DataTable::with_identity(columns(), RowIdentity::by_key(|r: &Row| r.id))
        .rows(vec![row(1, "Carol"), row(2, "Alice"), row(3, "Bob")])
        .selection_mode(SelectionMode::Multiple)
        .on_selection_change(move |rows| {
            *sink.borrow_mut() = rows.iter().map(|r| r.name.clone()).collect();
        });
    table.toggle_sort("name");
    // Display order is Alice, Bob, Carol; pick Carol then Alice with the keyboard.
    table.handle_event(InputEvent::key(KeyCode::End));
    table.handle_event(InputEvent::char(' '));
    table.handle_event(InputEvent::key(KeyCode::Home));
    table.handle_event(InputEvent::char(' '));
    assert_eq!(*seen.borrow(), vec!["Carol", "Alice"]);
}

#[test]
fn custom_renderer_and_row_style_apply() {
    let cols = vec![
        Column::new("name", "Name", |r: &Row| (&r.name).into())
            .render_with(|v, _, i| Line::from(format!("{}. {}", i + 1, v.display()))),
    ];
    let mut table = DataTable::new(cols)
        .rows(vec![row(1, "Ann"), row(2, "Ben")])
        .row_style(|r, _| {
            if r.id == 2 {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            }
        })
        .with_options(ratatui_kit::table::DataTableOptions {
            show_scrollbar: false,
            ..Default::default()
        });
    let area = Rect::new(0, 0, 12, 3);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    let text: String = (0..12)
        .filter_map(|x| buf.cell((x, 2)).map(|c| c.symbol().to_string()))
        .collect();
    assert_eq!(text.trim_end(), "2. Ben");
    assert_eq!(buf.cell((0, 2)).map(|c| c.fg), Some(Color::Magenta));
}

#[test]
fn clearing_hello_notifies_empty_value() {
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let mut field = InputField::new(InputFieldProps::new().label("Search").show_clear_button(true))
        .with_value("hello")
        .on_change(move |v| *sink.borrow_mut() = Some(v.to_string()));
    assert_eq!(field.clear(), InputFieldAction::Changed(String::new()));
    assert_eq!(field.value(), "");
    assert_eq!(seen.borrow().as_deref(), Some(""));
}

#[test]
fn visibility_toggled_twice_is_obscured_again() {
    let mut field = InputField::new(
        InputFieldProps::new()
            .kind(InputKind::Password)
            .show_password_toggle(true),
    )
    .with_value("hunter2");
    field.toggle_visibility();
    field.toggle_visibility();
    assert!(field.is_obscured());
}

#[test]
fn system_dark_then_toggle_persists_light() {
    let store = MemoryStore::new();
    let pref = ThemePreference::load(store.clone(), &FixedAppearance(true));
    assert_eq!(pref.mode(), ThemeMode::Dark);

    let mut switch = ThemeSwitch::new(pref.clone());
    switch.toggle();
    assert_eq!(pref.mode(), ThemeMode::Light);
    assert_eq!(store.value(THEME_KEY).as_deref(), Some("light"));
}

#[test]
fn theme_change_reaches_subscribers() {
    let pref = ThemePreference::ephemeral(ThemeMode::Light);
    let seen: Rc<RefCell<Vec<ThemeMode>>> = Rc::default();
    let sink = seen.clone();
    pref.subscribe(move |mode| sink.borrow_mut().push(mode));
    let mut a = ThemeSwitch::new(pref.clone());
    let mut b = ThemeSwitch::new(pref.clone());
    a.toggle();
    b.toggle();
    assert_eq!(*seen.borrow(), vec![ThemeMode::Dark, ThemeMode::Light]);
    assert_eq!(a.mode(), b.mode());
}
