use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui_kit::crossterm_input::input_event_from_crossterm;
use ratatui_kit::file_store::FileStore;
use ratatui_kit::help::HelpBar;
use ratatui_kit::input::InputEvent;
use ratatui_kit::input::KeyCode;
use ratatui_kit::input::MouseButton;
use ratatui_kit::input::MouseEventKind;
use ratatui_kit::input_field::InputField;
use ratatui_kit::input_field::InputFieldAction;
use ratatui_kit::input_field::InputFieldProps;
use ratatui_kit::input_field::InputKind;
use ratatui_kit::input_field::InputSize;
use ratatui_kit::input_field::InputVariant;
use ratatui_kit::keymap;
use ratatui_kit::keymap::Binding;
use ratatui_kit::preference::EnvAppearance;
use ratatui_kit::preference::MemoryStore;
use ratatui_kit::preference::ThemePreference;
use ratatui_kit::table::CellValue;
use ratatui_kit::table::Column;
use ratatui_kit::table::DataTable;
use ratatui_kit::table::RowIdentity;
use ratatui_kit::table::SelectionMode;
use ratatui_kit::table::TableAction;
use ratatui_kit::theme_switch::ThemeSwitch;
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: u32,
    name: &'static str,
    email: &'static str,
    role: &'static str,
    status: Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Active,
    Inactive,
    Pending,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
        }
    }
}

fn sample_users() -> Vec<User> {
    let user = |id, name, email, role, status| User {
        id,
        name,
        email,
        role,
        status,
    };
    vec![
        user(1, "John Doe", "john@example.com", "Admin", Status::Active),
        user(2, "Jane Smith", "jane@example.com", "User", Status::Active),
        user(3, "Bob Johnson", "bob@example.com", "Editor", Status::Inactive),
        user(4, "Alice Brown", "alice@example.com", "User", Status::Pending),
        user(5, "Charlie Wilson", "charlie@example.com", "Admin", Status::Active),
        user(6, "Diana Prince", "diana@example.com", "Editor", Status::Active),
        user(7, "Edward Norton", "edward@example.com", "User", Status::Inactive),
        user(8, "Fiona Green", "fiona@example.com", "User", Status::Pending),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Switch,
    Email,
    Password,
    Search,
    Username,
    Table,
}

const FOCUS_ORDER: [Focus; 6] = [
    Focus::Email,
    Focus::Password,
    Focus::Search,
    Focus::Username,
    Focus::Table,
    Focus::Switch,
];

#[derive(Clone, Copy, Debug, Default)]
struct Areas {
    switch: Rect,
    email: Rect,
    password: Rect,
    search: Rect,
    username: Rect,
    table: Rect,
}

struct App {
    preference: ThemePreference,
    switch: ThemeSwitch,
    email: InputField,
    password: InputField,
    search: InputField,
    username: InputField,
    table: DataTable<User>,
    selected: Rc<Cell<usize>>,
    /// Shared by the email and search fields. Filters the table by name or email.
    query: String,
    focus: Focus,
    areas: Areas,
}

impl App {
    fn new(preference: ThemePreference) -> Self {
        let selected = Rc::new(Cell::new(0));
        let sink = selected.clone();

        let status_column = Column::new("status", "Status", |u: &User| u.status.as_str().into())
            .sortable()
            .width(10)
            .render_with(|_, user: &User, _| {
                let color = match user.status {
                    Status::Active => Color::Green,
                    Status::Inactive => Color::Red,
                    Status::Pending => Color::Yellow,
                };
                let style = Style::default().fg(color);
                Line::from(vec![
                    Span::styled("● ", style),
                    Span::raw(user.status.as_str()),
                ])
            });
        let columns = vec![
            Column::new("id", "ID", |u: &User| u.id.into()).sortable().width(4),
            Column::new("name", "Name", |u: &User| u.name.into()).sortable(),
            Column::new("email", "Email", |u: &User| u.email.into()),
            Column::new("role", "Role", |u: &User| CellValue::from(u.role))
                .sortable()
                .width(8),
            status_column,
        ];
        let table = DataTable::with_identity(columns, RowIdentity::by_key(|u: &User| u.id))
            .rows(sample_users())
            .selection_mode(SelectionMode::Multiple)
            .empty_text("No users to show. Clear the search or press r to reload.")
            .on_selection_change(move |rows| sink.set(rows.len()));

        let email = InputField::new(
            InputFieldProps::new()
                .label("Email address")
                .placeholder("Enter your email")
                .helper_text("We will never share your email with anyone else."),
        )
        .on_change(|value| info!(len = value.len(), "email changed"));
        let password = InputField::new(
            InputFieldProps::new()
                .label("Password")
                .placeholder("Enter your password")
                .kind(InputKind::Password)
                .show_password_toggle(true)
                .variant(InputVariant::Filled),
        )
        .with_value("secretpassword");
        let search = InputField::new(
            InputFieldProps::new()
                .label("Search")
                .placeholder("Search...")
                .show_clear_button(true)
                .variant(InputVariant::Ghost)
                .size(InputSize::Sm),
        );
        let username = InputField::new(
            InputFieldProps::new()
                .label("Username")
                .placeholder("Pick a username")
                .invalid(true)
                .error_message("This username is already taken."),
        )
        .with_value("john_doe");

        let mut app = Self {
            switch: ThemeSwitch::new(preference.clone()),
            preference,
            email,
            password,
            search,
            username,
            table,
            selected,
            query: String::new(),
            focus: Focus::Email,
            areas: Areas::default(),
        };
        app.set_focus(Focus::Email);
        app
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.switch.set_focused(focus == Focus::Switch);
        self.email.set_focused(focus == Focus::Email);
        self.password.set_focused(focus == Focus::Password);
        self.search.set_focused(focus == Focus::Search);
        self.username.set_focused(focus == Focus::Username);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let n = FOCUS_ORDER.len();
        let i = FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        self.set_focus(FOCUS_ORDER[next]);
    }

    fn apply_query(&mut self) {
        let needle = self.query.to_lowercase();
        let rows = sample_users()
            .into_iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
            })
            .collect();
        self.table.set_rows(rows);
    }

    fn is_typing(&self) -> bool {
        !matches!(self.focus, Focus::Switch | Focus::Table)
    }

    /// Returns `false` when the app should quit.
    fn handle_event(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Key(key) = &event {
            match key.code {
                KeyCode::Esc => return false,
                KeyCode::Tab => {
                    self.cycle_focus(true);
                    return true;
                }
                KeyCode::BackTab => {
                    self.cycle_focus(false);
                    return true;
                }
                _ => {}
            }
            if !self.is_typing() {
                match key.code {
                    KeyCode::Char('q') => return false,
                    KeyCode::Char('r') => {
                        let loading = !self.table.is_loading();
                        self.table.set_loading(loading);
                        if !loading {
                            self.apply_query();
                        }
                        return true;
                    }
                    KeyCode::Char('x') => {
                        self.table.set_rows(Vec::new());
                        return true;
                    }
                    _ => {}
                }
            }
        }

        if let InputEvent::Mouse(mouse) = &event {
            let pos = mouse.position();
            let a = self.areas;
            let target = [
                (a.switch, Focus::Switch),
                (a.email, Focus::Email),
                (a.password, Focus::Password),
                (a.search, Focus::Search),
                (a.username, Focus::Username),
                (a.table, Focus::Table),
            ]
            .into_iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, focus)| focus);
            let Some(target) = target else {
                return true;
            };
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                self.set_focus(target);
            }
            if target != self.focus {
                return true;
            }
        }

        match self.focus {
            Focus::Switch => {
                self.switch.handle_event(event);
            }
            Focus::Table => {
                if let TableAction::SortChanged(sort) = self.table.handle_event(event) {
                    info!(column = %sort.column, "users sorted");
                }
            }
            Focus::Email => {
                if let InputFieldAction::Changed(value) = self.email.handle_event(event) {
                    self.search.set_value(value.clone());
                    self.query = value;
                    self.apply_query();
                }
            }
            Focus::Search => {
                if let InputFieldAction::Changed(value) = self.search.handle_event(event) {
                    self.email.set_value(value.clone());
                    self.query = value;
                    self.apply_query();
                }
            }
            Focus::Password => {
                self.password.handle_event(event);
            }
            Focus::Username => {
                self.username.handle_event(event);
            }
        }
        true
    }

    fn draw(&mut self, frame: &mut Frame) {
        let theme = self.preference.theme();
        let area = frame.area();
        frame.buffer_mut().set_style(area, theme.surface.patch(theme.text_primary));

        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);

        let card = |title: &'static str| {
            Block::bordered()
                .title(Span::styled(
                    format!(" {title} "),
                    theme.text_primary.add_modifier(Modifier::BOLD),
                ))
                .border_style(theme.border)
        };
        let left_inner = card("Form").inner(left);
        let right_inner = card("Users").inner(right);
        frame.render_widget(card("Form"), left);
        frame.render_widget(card("Users"), right);

        let fields = Layout::vertical([
            Constraint::Length(self.email.required_height()),
            Constraint::Length(self.password.required_height()),
            Constraint::Length(self.search.required_height()),
            Constraint::Length(self.username.required_height()),
            Constraint::Min(0),
        ])
        .spacing(1)
        .split(left_inner);
        let [table_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(right_inner);

        let switch_w = self.switch.required_width().min(header.width);
        let switch_area = Rect::new(header.right() - switch_w, header.y, switch_w, 1);
        self.areas = Areas {
            switch: switch_area,
            email: fields[0],
            password: fields[1],
            search: fields[2],
            username: fields[3],
            table: table_area,
        };

        let buf = frame.buffer_mut();
        buf.set_stringn(
            header.x + 1,
            header.y,
            "ratatui-kit demo",
            header.width.saturating_sub(switch_w + 1) as usize,
            theme.accent.add_modifier(Modifier::BOLD),
        );
        self.switch.render(switch_area, buf, &theme);
        self.email.render(fields[0], buf, &theme);
        self.password.render(fields[1], buf, &theme);
        self.search.render(fields[2], buf, &theme);
        self.username.render(fields[3], buf, &theme);
        self.table.render(table_area, buf, &theme);

        let count = self.selected.get();
        buf.set_stringn(
            status_area.x,
            status_area.y,
            format!("{count} row(s) selected"),
            status_area.width as usize,
            theme.text_muted,
        );

        HelpBar::new(self.help()).render(footer, buf, &theme);

        let cursor = match self.focus {
            Focus::Email => self.email.cursor_pos(fields[0]),
            Focus::Password => self.password.cursor_pos(fields[1]),
            Focus::Search => self.search.cursor_pos(fields[2]),
            Focus::Username => self.username.cursor_pos(fields[3]),
            Focus::Switch | Focus::Table => None,
        };
        if let Some(pos) = cursor {
            frame.set_cursor_position(pos);
        }
    }

    fn help(&self) -> Vec<Binding> {
        let mut bindings = vec![Binding::new(
            "tab",
            "focus",
            vec![keymap::key(KeyCode::Tab), keymap::key(KeyCode::BackTab)],
        )];
        match self.focus {
            Focus::Switch => bindings.push(self.switch.help()),
            Focus::Table => {
                bindings.extend(self.table.bindings().help(self.table.mode()));
                bindings.push(Binding::new("r", "reload", vec![keymap::key_char('r')]));
                bindings.push(Binding::new("x", "empty", vec![keymap::key_char('x')]));
            }
            Focus::Email => bindings.extend(self.email.help()),
            Focus::Password => bindings.extend(self.password.help()),
            Focus::Search => bindings.extend(self.search.help()),
            Focus::Username => bindings.extend(self.username.help()),
        }
        let quit = if self.focus == Focus::Switch || self.focus == Focus::Table {
            "q/esc"
        } else {
            "esc"
        };
        bindings.push(Binding::new(
            quit,
            "quit",
            vec![keymap::key(KeyCode::Esc), keymap::key_char('q')],
        ));
        bindings
    }
}

fn load_preference() -> ThemePreference {
    match FileStore::open_default() {
        Ok(store) => {
            info!(path = ?store.path(), "using preference file");
            ThemePreference::load(store, &EnvAppearance)
        }
        Err(err) => {
            warn!(error = %err, "preference file unavailable, theme will not persist");
            ThemePreference::load(MemoryStore::new(), &EnvAppearance)
        }
    }
}

fn main() -> io::Result<()> {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "ratatui-kit-demo.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut app = App::new(load_preference());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Some(event) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if !app.handle_event(event) {
            info!("demo exiting");
            return Ok(());
        }
    }
}
