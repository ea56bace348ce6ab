use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use anyhow::Result;
use brightside_core::MotivationRecord;
use brightside_scheduler::{Notifier, ReminderEvent, ReminderScheduler, REMINDER_TITLE};
use brightside_service::{BlockingMotivationService, ServiceError};
use brightside_store::{StateStore, GOALS_KEY};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::components::cards;

/// What the app is currently doing
#[derive(Debug, Clone)]
pub enum Mode {
    /// Viewing the day's motivation
    Normal,
    /// Typing goal text
    EditGoals { input: String },
    /// Asking whether to enable the daily reminder
    PermissionPrompt,
}

/// Whether the user has allowed desktop notifications this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet
    Default,
    Granted,
    Denied,
}

pub struct App {
    service: BlockingMotivationService,
    scheduler: ReminderScheduler,
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
    handle: tokio::runtime::Handle,
    mode: Mode,
    motivation: Option<MotivationRecord>,
    loading: bool,
    error: Option<String>,
    goals: String,
    permission: Permission,
    status_message: Option<String>,
    /// In-flight fetch. Replacing the receiver abandons the old fetch, so
    /// the most recently started request always wins.
    pending: Option<Receiver<Result<MotivationRecord, ServiceError>>>,
    reminders: Receiver<ReminderEvent>,
}

impl App {
    pub fn new(
        service: BlockingMotivationService,
        scheduler: ReminderScheduler,
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        reminders: Receiver<ReminderEvent>,
    ) -> Result<Self> {
        let handle = service.handle();

        let goals = handle
            .block_on(store.get(GOALS_KEY))?
            .unwrap_or_default();

        if let Some(stale) = handle.block_on(scheduler.stored_handle())? {
            tracing::info!(%stale, "previous session left a reminder handle behind");
        }

        let mut app = Self {
            service,
            scheduler,
            store,
            notifier,
            handle,
            mode: Mode::Normal,
            motivation: None,
            loading: false,
            error: None,
            goals,
            permission: Permission::Default,
            status_message: None,
            pending: None,
            reminders,
        };
        app.start_fetch();
        // Notification permission is session-only, so every session starts
        // at Default and gets the one-shot prompt.
        app.mode = Mode::PermissionPrompt;
        Ok(app)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn motivation(&self) -> Option<&MotivationRecord> {
        self.motivation.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn goals(&self) -> &str {
        &self.goals
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::EditGoals { .. })
    }

    pub fn reminder_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Kick off a fetch on a worker thread so the UI keeps drawing.
    pub fn start_fetch(&mut self) {
        self.loading = true;
        self.error = None;
        self.motivation = None;

        let (tx, rx) = mpsc::channel();
        self.pending = Some(rx);

        let service = self.service.service();
        let handle = self.handle.clone();
        let goals = self.goals.clone();
        std::thread::spawn(move || {
            let result = handle.block_on(service.fetch_motivation(&goals));
            // Receiver may already have been replaced by a newer fetch.
            let _ = tx.send(result);
        });
    }

    /// Drain background results. Called by the event loop between key events.
    pub fn poll(&mut self) {
        if let Some(rx) = &self.pending {
            match rx.try_recv() {
                Ok(Ok(record)) => {
                    self.loading = false;
                    self.error = None;
                    self.motivation = Some(record);
                    self.pending = None;
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "motivation fetch failed");
                    self.loading = false;
                    self.error = Some(e.user_message().to_string());
                    self.pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.loading = false;
                    self.pending = None;
                }
            }
        }

        while let Ok(event) = self.reminders.try_recv() {
            match event {
                ReminderEvent::Fired => {
                    self.status_message = Some(REMINDER_TITLE.to_string());
                    self.start_fetch();
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match &self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::EditGoals { input } => self.handle_edit_goals(key, input.clone()),
            Mode::PermissionPrompt => self.handle_permission_prompt(key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.start_fetch(),
            KeyCode::Char('g') => {
                self.mode = Mode::EditGoals {
                    input: self.goals.clone(),
                };
            }
            KeyCode::Char('n') => match self.permission {
                Permission::Default => {
                    self.mode = Mode::PermissionPrompt;
                }
                Permission::Granted => {
                    self.status_message = Some("Daily reminder is already set".into());
                }
                Permission::Denied => {
                    self.status_message = Some("Notifications were declined this session".into());
                }
            },
            _ => {}
        }
    }

    fn handle_edit_goals(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                if let Err(e) = self.handle.block_on(self.store.set(GOALS_KEY, &input)) {
                    tracing::warn!(error = %e, "failed to persist goals");
                    self.status_message = Some("Could not save goals".into());
                }
                self.goals = input;
                self.mode = Mode::Normal;
                self.start_fetch();
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::EditGoals { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::EditGoals { input };
            }
            _ => {}
        }
    }

    fn handle_permission_prompt(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if self.notifier.probe() {
                    self.permission = Permission::Granted;
                    match self.handle.block_on(self.scheduler.schedule_next()) {
                        Ok(id) => {
                            tracing::info!(%id, "daily reminder armed");
                            self.status_message = Some("Daily reminder set for 9:00 AM".into());
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to arm reminder");
                            self.status_message = Some("Could not set the daily reminder".into());
                        }
                    }
                } else {
                    self.status_message =
                        Some("This system does not support desktop notifications".into());
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.permission = Permission::Denied;
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.render_body(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays
        match &self.mode {
            Mode::Normal => {}
            Mode::EditGoals { input } => self.render_input_bar(frame, "Goals: ", input, area),
            Mode::PermissionPrompt => self.render_permission_prompt(frame, area),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" brightside ", Style::default().bold().fg(Color::Yellow)),
            Span::raw("| "),
            Span::styled("Daily Motivation", Style::default().fg(Color::Cyan)),
        ];
        if !self.goals.trim().is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("Goals: {}", self.goals),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.error {
            cards::render_message(frame, area, msg, Color::Red);
        } else if let Some(ref record) = self.motivation {
            cards::render_record(frame, area, record);
        } else if self.loading {
            cards::render_message(frame, area, "Fetching your daily motivation...", Color::Cyan);
        } else {
            cards::render_message(frame, area, "Press r to fetch your daily motivation", Color::DarkGray);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(line, area);
            return;
        }
        if self.loading {
            let line = Line::from(Span::styled(
                " Loading...",
                Style::default().fg(Color::Cyan),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("r", "refresh"),
                ("g", "goals"),
                ("n", "reminder"),
            ],
            Mode::EditGoals { .. } => vec![("Enter", "save & refresh"), ("Esc", "cancel")],
            Mode::PermissionPrompt => vec![("y", "enable"), ("n", "not now")],
        };
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(k, desc)| {
                vec![
                    Span::styled(format!(" {k}"), Style::default().bold().fg(Color::Cyan)),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();
        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(&self, frame: &mut Frame, label: &str, input: &str, area: Rect) {
        let bar = Rect {
            x: area.x,
            y: area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(Clear, bar);
        let line = Line::from(vec![
            Span::styled(label, Style::default().bold().fg(Color::Yellow)),
            Span::raw(input),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(line, bar);
    }

    fn render_permission_prompt(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Daily Reminder ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let text = vec![
            Line::from("Get a desktop notification every morning at 9:00 AM?"),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().bold().fg(Color::Green)),
                Span::raw(" enable    "),
                Span::styled("n", Style::default().bold().fg(Color::Red)),
                Span::raw(" not now"),
            ]),
        ];
        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
