//! UI-level state that drives rendering.
//! Holds input buffers and the status line; chat content itself is read
//! from the controller each frame. Updated by draining the EventBus.

use chrono::NaiveDate;
use buddy_types::event::{ChatEvent, ExchangeFailure};
use buddy_types::planner::Task;

/// Which page fills the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Planner,
}

/// State visible to UI panels
pub struct UiState {
    pub page: Page,
    /// Chat input field content
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
    /// Session whose reply is still pending
    pub pending_session: Option<String>,
    pub last_failure: Option<ExchangeFailure>,
    pub task_form: TaskForm,
    pub task_search: String,
    /// Task currently open for inline editing
    pub task_edit: Option<TaskEdit>,
    pub day_form: DayForm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub subject: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.due_date.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edit buffer for one existing task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub id: u64,
    pub form: TaskForm,
}

impl TaskEdit {
    pub fn of(task: &Task) -> Self {
        Self {
            id: task.id,
            form: TaskForm {
                title: task.title.clone(),
                subject: task.subject.clone(),
                due_date: task.due_date.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DayForm {
    /// YYYY-MM-DD
    pub date: String,
    pub title: String,
    pub description: String,
}

impl DayForm {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn description(&self) -> Option<String> {
        let d = self.description.trim();
        if d.is_empty() {
            None
        } else {
            Some(d.to_string())
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            page: Page::Chat,
            input_text: String::new(),
            show_settings: false,
            status_text: "Ready".to_string(),
            pending_session: None,
            last_failure: None,
            task_form: TaskForm::default(),
            task_search: String::new(),
            task_edit: None,
            day_form: DayForm::default(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionsChanged => {}
                ChatEvent::ExchangeStarted { session_id } => {
                    self.pending_session = Some(session_id);
                    self.last_failure = None;
                    self.status_text = "Thinking...".to_string();
                }
                ChatEvent::ExchangeFinished { failure, .. } => {
                    self.pending_session = None;
                    self.last_failure = failure;
                    self.status_text = match failure {
                        None => "Ready".to_string(),
                        Some(f) => format!("Last reply failed: {}", f.label()),
                    };
                }
                ChatEvent::SendRejected { text, reason } => {
                    log::debug!("Send rejected ({}), restoring input", reason.label());
                    // Don't clobber anything typed since
                    if self.input_text.trim().is_empty() {
                        self.input_text = text;
                    }
                    self.status_text = format!("Not sent: {}", reason.label());
                }
            }
        }
    }

    /// Whether the "Thinking..." bubble belongs in `session_id`
    pub fn is_waiting_in(&self, session_id: &str) -> bool {
        self.pending_session.as_deref() == Some(session_id)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
