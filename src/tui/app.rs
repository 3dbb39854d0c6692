use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::{Backend, WarehouseStore};
use crate::combo::Autocomplete;
use crate::form::{EditItemForm, FieldErrors, FormField, ItemForm, SubmitError, Submitted};
use crate::io::config_io::{self, LoadedConfig};
use crate::logging;
use crate::model::{AppConfig, ByName, Product, Supplier, WarehouseItem};

use super::input;
use super::render;
use super::theme::Theme;

/// Longest input poll; comboboxes are ticked at least this often
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Simulated network latency for `--demo`, so the debounce is visible
const DEMO_LATENCY: Duration = Duration::from_millis(150);

const LOG_FILE: &str = "stockroom.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Outcome of the last submit, shown in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Main application state
pub struct App {
    pub form: ItemForm,
    /// Product lookup bound to the form's name field
    pub name_combo: Autocomplete<Product, ByName>,
    /// Supplier lookup bound to the form's supplier field
    pub supplier_combo: Autocomplete<Supplier, ByName>,
    pub focus: FormField,
    /// Validation messages from the last submit attempt
    pub errors: FieldErrors,
    pub status: Option<StatusMessage>,
    pub store: Arc<dyn WarehouseStore>,
    pub theme: Theme,
    /// Dropdown rows shown before scrolling
    pub max_visible: usize,
    pub should_quit: bool,
}

impl App {
    /// An empty add-item form
    pub fn new(backend: Backend, config: &AppConfig) -> Self {
        let delay = config.autocomplete.debounce();
        let placeholder = config.autocomplete.placeholder.clone();
        App {
            form: ItemForm::default(),
            name_combo: Autocomplete::new(backend.products, ByName, delay)
                .with_placeholder(placeholder.clone()),
            supplier_combo: Autocomplete::new(backend.suppliers, ByName, delay)
                .with_placeholder(placeholder),
            focus: FormField::Name,
            errors: FieldErrors::new(),
            status: None,
            store: backend.store,
            theme: Theme::from_config(&config.ui),
            max_visible: config.autocomplete.max_visible.max(1),
            should_quit: false,
        }
    }

    /// The edit form for `item`, with both comboboxes showing its values
    pub fn edit(backend: Backend, config: &AppConfig, item: &WarehouseItem) -> Self {
        let mut app = App::new(backend, config);
        app.form = ItemForm::Edit(EditItemForm::from_item(item));
        app.name_combo.seed_from(app.form.name());
        app.supplier_combo.seed_from(app.form.supplier());
        app
    }

    pub fn title(&self) -> String {
        match &self.form {
            ItemForm::Add(_) => "Add warehouse item".to_string(),
            ItemForm::Edit(form) => format!("Edit warehouse item #{}", form.id),
        }
    }

    /// Drive both comboboxes. Returns true when either list changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let name = self.name_combo.tick(now);
        let supplier = self.supplier_combo.tick(now);
        name || supplier
    }

    /// Earliest scheduled lookup across both comboboxes
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.name_combo.next_deadline(),
            self.supplier_combo.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// How long to wait for input so a scheduled lookup fires on time
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.next_deadline() {
            Some(at) => at.saturating_duration_since(now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }

    /// True when the focused field's dropdown is showing anything
    pub fn list_open(&self) -> bool {
        match self.focus {
            FormField::Name => self.name_combo.is_open(),
            FormField::Supplier => self.supplier_combo.is_open(),
            _ => false,
        }
    }

    /// Move focus, closing the dropdown of the field being left
    pub fn set_focus(&mut self, field: FormField) {
        if field == self.focus {
            return;
        }
        match self.focus {
            FormField::Name => self.name_combo.dismiss(),
            FormField::Supplier => self.supplier_combo.dismiss(),
            _ => {}
        }
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next_in(self.form.fields()));
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev_in(self.form.fields()));
    }

    /// Validate and save the form. Adding clears the form and both
    /// comboboxes; a saved edit keeps its values. Any failure keeps what
    /// was entered.
    pub fn submit(&mut self) {
        match self.form.submit(self.store.as_ref()) {
            Ok(Submitted::Added(item)) => {
                log::info!("stored {:?} from {:?}", item.name, item.supplier);
                self.name_combo.reset();
                self.supplier_combo.reset();
                self.errors.clear();
                self.focus = FormField::Name;
                self.status = Some(StatusMessage::success(format!(
                    "Added {} ({} {:.2} {})",
                    item.name,
                    item.quantity.unwrap_or(1),
                    item.price,
                    item.currency_key
                )));
            }
            Ok(Submitted::Updated { id, update }) => {
                log::info!("updated item #{} to {}", id, update.status_key);
                self.name_combo.dismiss();
                self.supplier_combo.dismiss();
                self.errors.clear();
                self.status = Some(StatusMessage::success(format!(
                    "Saved #{} {} ({:.2} {}, {})",
                    id,
                    update.name,
                    update.price,
                    update.currency_key,
                    update.status_key.label()
                )));
            }
            Err(SubmitError::Invalid(errors)) => {
                let first = errors.keys().next().copied();
                self.status = Some(StatusMessage::error(format!(
                    "{} field(s) need attention",
                    errors.len()
                )));
                self.errors = errors;
                if let Some(field) = first {
                    self.set_focus(field);
                }
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }
}

/// Run the form: the add form, or the edit form for item `edit`.
pub fn run(
    cli_config: Option<&str>,
    demo: bool,
    verbose: bool,
    edit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let explicit = cli_config.map(Path::new);
    let loaded: LoadedConfig = config_io::load_config(explicit, &cwd)?;

    logging::init_file(&loaded.base_dir(&cwd).join(LOG_FILE), verbose)?;

    let backend = if demo {
        Backend::demo(DEMO_LATENCY)
    } else {
        Backend::http(&loaded.config.api)?
    };
    let mut app = match edit {
        Some(id) => {
            let item = backend.store.get_item(id)?;
            App::edit(backend, &loaded.config, &item)
        }
        None => App::new(backend, &loaded.config),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
        app.tick(Instant::now());
    }
    Ok(())
}
