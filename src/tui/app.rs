//! Main TUI application state machine.
//!
//! Handles:
//! - Mapping keys to queue commands
//! - Blocking notifications
//! - Background photo encoding via `EncodeWorker`

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::sqlite::SqliteStorage;
use crate::application::{LoadReport, QueueService};
use crate::config::AppConfig;
use crate::domain::{validate_name, Command, Outcome, QueueError};
use crate::WaitlineError;

use super::ui::{
    current::render_current_patient,
    form::{render_patient_form, PatientFormState},
    render_footer, render_header, render_notification,
    waiting_list::render_waiting_list,
    Notification,
};
use super::worker::{EncodeProgress, EncodeWorker, EncodeWorkerHandle, PendingAdd};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Queue state and persistence
    service: QueueService<SqliteStorage>,

    /// Intake form
    form: PatientFormState,

    /// Modal message blocking other input
    notification: Option<Notification>,

    /// Photo encodes still running, oldest first
    pending: Vec<EncodeWorkerHandle>,
}

impl App {
    /// Create the application from configuration.
    ///
    /// Opens the database and restores the saved queue.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or read.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let storage = Arc::new(SqliteStorage::new(&config.db_path)?);
        tracing::info!(
            urgent_order = %config.urgent_order,
            "Opened queue database"
        );

        let service = QueueService::new(storage, config.urgent_order);
        Self::with_dependencies(service)
    }

    /// Create application with an injected queue service and restore its
    /// stored state.
    ///
    /// # Errors
    /// Returns error if the stored state cannot be read.
    pub fn with_dependencies(mut service: QueueService<SqliteStorage>) -> Result<Self> {
        let report = service.load_state()?;

        Ok(Self {
            should_quit: false,
            service,
            form: PatientFormState::default(),
            notification: Self::load_notice(&report),
            pending: Vec::new(),
        })
    }

    fn load_notice(report: &LoadReport) -> Option<Notification> {
        if report.skipped.is_empty() {
            return None;
        }
        Some(Notification::warning(
            "Saved data ignored",
            format!(
                "Could not read saved {}; starting those parts empty.",
                report.skipped.join(", ")
            ),
        ))
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let state = self.service.state();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        render_header(f, rows[0], state.waiting.len(), state.waiting.urgent_len());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // Form
                Constraint::Min(5),    // In service
            ])
            .split(columns[0]);

        render_patient_form(f, left[0], &self.form, self.pending.len());
        render_current_patient(f, left[1], state.current.as_ref());
        render_waiting_list(f, columns[1], &state.waiting);
        render_footer(f, rows[2]);

        if let Some(notice) = &self.notification {
            render_notification(f, f.area(), notice);
        }
    }

    /// Deliver finished photo encodes to the queue.
    fn poll_workers(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|worker| match worker.try_recv() {
            Some(progress) => {
                finished.push((worker.request.clone(), progress));
                false
            }
            None => true,
        });

        for (request, progress) in finished {
            match progress {
                EncodeProgress::Complete(data_url) => {
                    self.submit(request.name, Some(data_url), request.urgent);
                }
                EncodeProgress::Error(message) => {
                    self.notify(Notification::error("Photo could not be read", message));
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global quit handling
        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.notification.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notification = None;
            }
            return;
        }

        match key.code {
            KeyCode::Char('u') if ctrl => self.request_add(true),
            KeyCode::Char('a') if ctrl => self.dispatch(Command::Advance),
            KeyCode::Char('x') if ctrl => self.dispatch(Command::ClearCurrent),
            KeyCode::Enter => self.request_add(false),
            KeyCode::Tab | KeyCode::BackTab => self.form.toggle_focus(),
            KeyCode::Esc => self.form.clear(),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Char(c) if !ctrl => self.form.input_char(c),
            _ => {}
        }
    }

    /// Add the patient described by the form, encoding the photo first if
    /// one was given.
    fn request_add(&mut self, urgent: bool) {
        let name = match validate_name(&self.form.name) {
            Ok(name) => name,
            Err(e) => {
                self.report(WaitlineError::Queue(e));
                return;
            }
        };

        match self.form.photo() {
            Some(path) => {
                let request = PendingAdd {
                    name,
                    urgent,
                    photo_path: PathBuf::from(path),
                };
                tracing::debug!(urgent, "Encoding photo before adding patient");
                self.pending.push(EncodeWorker::spawn(request));
            }
            None => self.submit(name, None, urgent),
        }
    }

    fn submit(&mut self, name: String, image: Option<String>, urgent: bool) {
        let added = self.dispatch_inner(Command::AddPatient { name, image, urgent });
        if matches!(added, Some(Outcome::Added { .. })) {
            self.form.clear();
        }
    }

    fn dispatch(&mut self, command: Command) {
        let _ = self.dispatch_inner(command);
    }

    fn dispatch_inner(&mut self, command: Command) -> Option<Outcome> {
        match self.service.dispatch(command) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Turn an error into the notification the user sees.
    fn report(&mut self, error: WaitlineError) {
        let notice = match &error {
            WaitlineError::Queue(QueueError::Validation(_)) => {
                Notification::warning("Name required", "Please enter the patient's name.")
            }
            WaitlineError::Queue(QueueError::NotFound(_)) => {
                Notification::info("Queue empty", "There is no one in the queue to attend.")
            }
            WaitlineError::Encoding(e) => {
                Notification::error("Photo could not be read", e.to_string())
            }
            other => {
                tracing::error!("Queue operation failed: {other}");
                Notification::error("Could not save", other.to_string())
            }
        };
        self.notify(notice);
    }

    fn notify(&mut self, notice: Notification) {
        // Later notices replace an unread one; the last problem is the relevant one.
        self.notification = Some(notice);
    }
}
