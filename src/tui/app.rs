//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, the
//! reminder state and the deadline schedule, handles key presses, and renders
//! the single-screen interface (form, summary, task list, status bar) plus the
//! help and reminder overlays.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    dates::{format_date, format_due_relative},
    monitor::{is_overdue, CancellationToken, DeadlineMonitor, Schedule},
    reminder::{Reminder, ReminderAction, ReminderOutcome},
    store::TaskStore,
    summary::TaskSummary,
    task::Task,
    tui::{
        colors::{DARK_RED, DARK_TEAL, DIM_GREEN, GOLD},
        enums::AppState,
        input::InputField,
        task_form::{TaskForm, DESCRIPTION_FIELD, END_DATE_FIELD, START_DATE_FIELD},
        task_item::{ItemMode, TaskEditor},
        utils::centered_rect,
    },
};

/// Upper bound on how long the loop waits for a key before re-checking the schedule.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskStore,
    reminder: Reminder,
    monitor: DeadlineMonitor,
    schedule: Schedule,
    stop: CancellationToken,
    clock: Box<dyn Clock>,
    task_form: TaskForm,
    /// One entry per task in the store.
    item_modes: HashMap<u64, ItemMode>,
    task_list_state: TableState,
    status_message: String,
}

impl App {
    /// Create an App with an empty store, reading time from the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create an App that reads the current date-time from `clock`.
    pub fn with_clock(config: &Config, clock: Box<dyn Clock>) -> Self {
        let stop = CancellationToken::new();
        App {
            state: AppState::TaskList,
            store: TaskStore::new(),
            reminder: Reminder::new(),
            monitor: DeadlineMonitor::new(),
            schedule: Schedule::start(config.check_interval, Instant::now(), stop.clone()),
            stop,
            clock,
            task_form: TaskForm::new(),
            item_modes: HashMap::new(),
            task_list_state: TableState::default(),
            status_message: String::new(),
        }
    }

    /// Stop the event loop and the deadline schedule with it.
    pub fn shutdown(&self) {
        if !self.stop.is_cancelled() {
            debug!("shutting down, deadline schedule cancelled");
        }
        self.stop.cancel();
    }

    /// Run one deadline scan and flag the task it picks, if any.
    pub fn check_deadlines(&mut self) {
        let now = self.clock.now();
        if let Some(task) = self.monitor.scan(self.store.tasks(), now) {
            self.reminder.flag(task.clone());
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Id of the highlighted row.
    pub fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.store.tasks().get(idx))
            .map(|t| t.id)
    }

    /// Keep the highlighted row inside the list after it grows or shrinks.
    fn sync_selection(&mut self) {
        let len = self.store.len();
        let selected = match self.task_list_state.selected() {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => Some(0),
        };
        self.task_list_state.select(selected);
    }

    fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let next = self.task_list_state.selected().map_or(0, |i| (i + 1) % len);
        self.task_list_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let prev = self
            .task_list_state
            .selected()
            .map_or(len - 1, |i| if i == 0 { len - 1 } else { i - 1 });
        self.task_list_state.select(Some(prev));
    }

    /// Handle one key event.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();

        if self.reminder.is_open() {
            self.handle_reminder_input(key.code);
            return false;
        }

        match self.state {
            AppState::TaskList => self.handle_task_list_input(key.code),
            AppState::TaskForm => {
                self.handle_form_input(key.code);
                false
            }
            AppState::Help => {
                self.handle_help_input(key.code);
                false
            }
        }
    }

    /// Handle keyboard input while the reminder dialog is open.
    fn handle_reminder_input(&mut self, key: KeyCode) {
        let action = match key {
            KeyCode::Char('c') | KeyCode::Char('C') => ReminderAction::Complete,
            KeyCode::Char('p') | KeyCode::Char('P') => ReminderAction::Postpone,
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('X') => ReminderAction::Close,
            _ => return,
        };
        let today = self.clock.today();
        let msg = match self.reminder.apply(action, &mut self.store, today) {
            ReminderOutcome::Completed(code) => format!("{code} completed"),
            ReminderOutcome::Postponed { code, end_date } => {
                format!("{code} postponed to {}", format_date(end_date))
            }
            ReminderOutcome::Dismissed => "Reminder dismissed".to_string(),
            ReminderOutcome::Stale(code) => format!("{code} no longer exists"),
            ReminderOutcome::Idle => String::new(),
        };
        self.set_status_message(msg);
    }

    /// Handle keyboard input in the task list.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        if let Some(id) = self.selected_task_id() {
            if self.item_modes.get(&id).is_some_and(ItemMode::is_editing) {
                self.handle_editor_input(id, key);
                return false;
            }
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('a') | KeyCode::Tab => {
                self.state = AppState::TaskForm;
                self.task_form.update_active_field();
            }
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_task(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle keyboard input for a row in edit mode.
    fn handle_editor_input(&mut self, id: u64, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.item_modes.insert(id, ItemMode::View);
                self.set_status_message("Edit discarded".to_string());
                return;
            }
            KeyCode::Enter => {
                self.save_edit(id);
                return;
            }
            KeyCode::Up => {
                self.select_previous();
                return;
            }
            KeyCode::Down => {
                self.select_next();
                return;
            }
            _ => {}
        }

        let Some(ItemMode::Edit(editor)) = self.item_modes.get_mut(&id) else {
            return;
        };
        match key {
            KeyCode::Tab | KeyCode::BackTab => editor.toggle_focus(),
            other => edit_field(editor.current_mut(), other),
        }
    }

    /// Put the highlighted row into edit mode.
    fn start_edit(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.store.get(id) {
            self.item_modes.insert(id, ItemMode::Edit(TaskEditor::from_task(task)));
        }
    }

    /// Write a row's edit buffer back to the store and return it to view mode.
    fn save_edit(&mut self, id: u64) {
        let today = self.clock.today();
        let Some(ItemMode::Edit(editor)) = self.item_modes.get(&id) else {
            return;
        };
        let Some(task) = self.store.get(id) else {
            self.item_modes.remove(&id);
            return;
        };
        match editor.apply_to(task, today) {
            Ok(updated) => {
                let code = updated.code.clone();
                self.store.update_task(updated);
                self.item_modes.insert(id, ItemMode::View);
                self.set_status_message(format!("Saved {code}"));
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    /// Delete the highlighted task. There is no confirmation step.
    fn delete_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.store.delete_task(id) {
            self.item_modes.remove(&id);
            self.sync_selection();
            self.set_status_message(format!("Deleted {}", Task::code_for(id)));
        }
    }

    /// Handle keyboard input in the creation form.
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.task_form.blur();
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Enter => self.create_task(),
            other => edit_field(self.task_form.current_mut(), other),
        }
    }

    /// Create a task from the form, clearing the form on success.
    fn create_task(&mut self) {
        let today = self.clock.today();
        match self.task_form.submit(today) {
            Ok(new_task) => {
                let id = self.store.add_task(new_task);
                self.item_modes.insert(id, ItemMode::View);
                self.sync_selection();
                self.set_status_message(format!("Created {}", Task::code_for(id)));
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
            self.state = AppState::TaskList;
        }
    }

    /// Poll for and handle one keyboard event, waiting at most until the next scheduled check.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        let timeout = self
            .schedule
            .time_until_next(Instant::now())
            .map_or(MAX_POLL, |d| d.min(MAX_POLL));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let today = self.clock.today();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TO-DO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Today: {}", format_date(today)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the three creation inputs side by side.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let focused = self.state == AppState::TaskForm;
        let inputs = [
            (DESCRIPTION_FIELD, "Description *", &self.task_form.description),
            (START_DATE_FIELD, "Start *", &self.task_form.start_date),
            (END_DATE_FIELD, "End *", &self.task_form.end_date),
        ];
        for (i, title, field) in inputs {
            let border_style = if focused && self.task_form.current_field == i {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            };
            let input = Paragraph::new(field.display()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            );
            f.render_widget(input, chunks[i]);
        }
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let summary = TaskSummary::from_tasks(self.store.tasks());
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::raw("Completed: "),
            Span::styled(summary.completed.to_string(), bold),
            Span::raw("   Incomplete: "),
            Span::styled(summary.incomplete.to_string(), bold),
            Span::raw("   In progress: "),
            Span::styled(summary.in_progress.to_string(), bold),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Summary"));
        f.render_widget(paragraph, area);
    }

    /// Render the task table, drawing rows in edit mode with their edit buffers.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let now = self.clock.now();
        let today = now.date();

        let header_cells = ["Code", "Description", "Start", "End", "Status", "Due"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(DARK_TEAL).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .store
            .tasks()
            .iter()
            .map(|task| match self.item_modes.get(&task.id) {
                Some(ItemMode::Edit(editor)) => Row::new(vec![
                    Cell::from(task.code.clone()),
                    Cell::from(editor.description.display()),
                    Cell::from(format_date(task.start_date)),
                    Cell::from(editor.end_date.display()),
                    Cell::from("editing"),
                    Cell::from("Enter/Esc"),
                ])
                .style(Style::default().fg(GOLD)),
                _ => {
                    let style = if task.is_completed() {
                        Style::default().fg(DIM_GREEN)
                    } else if is_overdue(task, now) {
                        Style::default().bg(DARK_RED).fg(Color::White)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Row::new(vec![
                        Cell::from(task.code.clone()),
                        Cell::from(task.description.clone()),
                        Cell::from(format_date(task.start_date)),
                        Cell::from(format_date(task.end_date)),
                        Cell::from(task.status.label()),
                        Cell::from(format_due_relative(task.end_date, today)),
                    ])
                    .style(style)
                }
            })
            .collect();

        let widths = [
            Constraint::Length(8),  // Code
            Constraint::Min(20),    // Description
            Constraint::Length(12), // Start
            Constraint::Length(12), // End
            Constraint::Length(11), // Status
            Constraint::Length(10), // Due
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}) - Press 'h' for help",
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    /// Render the blocking dialog for the flagged task.
    fn render_reminder(&self, f: &mut Frame, area: Rect) {
        let Some(task) = self.reminder.flagged() else {
            return;
        };
        let area = centered_rect(60, 40, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .title("Pending Task")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED).fg(Color::White));
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(task.code.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(task.description.clone()),
            Line::from(format!("Ended: {}", format_date(task.end_date))),
            Line::from(""),
            Line::from("[c] Complete   [p] Postpone   [Esc] Close"),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(Span::styled("Task list", bold)),
            Line::from("  Up/Down     select task"),
            Line::from("  a / Tab     new task"),
            Line::from("  e / Enter   edit selected task"),
            Line::from("  d / Del     delete selected task"),
            Line::from("  q           quit"),
            Line::from(Span::styled("Editing a task", bold)),
            Line::from("  Tab         switch description / end date"),
            Line::from("  Enter       save    Esc  discard"),
            Line::from(Span::styled("New task form", bold)),
            Line::from("  Tab         next field    Enter  create    Esc  back"),
            Line::from("  Dates: YYYY-MM-DD, today, tomorrow, in 3d, friday"),
            Line::from(Span::styled("Pending task dialog", bold)),
            Line::from("  c  complete    p  postpone to tomorrow    Esc  close"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.reminder.is_open() {
            "Task overdue: c complete | p postpone | Esc close".to_string()
        } else {
            match self.state {
                AppState::TaskList if self.store.is_empty() => {
                    "No tasks yet | Press 'a' to add one, 'h' for help".to_string()
                }
                AppState::TaskList => {
                    let editing = self.item_modes.values().filter(|m| m.is_editing()).count();
                    if editing > 0 {
                        format!("Tasks: {} | Editing: {} | Press 'h' for help", self.store.len(), editing)
                    } else {
                        format!("Tasks: {} | Press 'h' for help", self.store.len())
                    }
                }
                AppState::TaskForm => "New task: Tab next field | Enter create | Esc back".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(DARK_TEAL).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Form
                Constraint::Length(3), // Summary
                Constraint::Min(0),    // Tasks
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_task_form(f, chunks[1]);
        self.render_summary(f, chunks[2]);
        self.render_task_list(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);

        if self.state == AppState::Help {
            self.render_help(f, area);
        }
        self.render_reminder(f, area);
    }

    /// Main event loop for the TUI application.
    ///
    /// Renders, handles input, and runs a deadline scan whenever the schedule
    /// fires, until the user quits or the shutdown token is cancelled.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        debug!("ui started, checking deadlines every {:?}", self.schedule.interval());
        while !self.stop.is_cancelled() {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                self.shutdown();
            } else if self.schedule.poll(Instant::now()) {
                self.check_deadlines();
            }
        }
        Ok(())
    }
}

/// Apply a cursor or editing key to a text input.
fn edit_field(field: &mut InputField, key: KeyCode) {
    match key {
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        KeyCode::Backspace => field.handle_backspace(),
        KeyCode::Delete => field.handle_delete(),
        KeyCode::Char(c) => field.handle_char(c),
        _ => {}
    }
}
