//! Planner stores: the task list, the important-days calendar, and the
//! dashboard summary built from both.
//!
//! Each store keeps its records in memory and rewrites its storage key on
//! every mutation.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};

use buddy_types::{
    Result,
    config::{IMPORTANT_DAYS_KEY, TASKS_KEY},
    planner::{ImportantDay, ImportantDayPatch, Task},
};
use crate::ports::{Clock, KeyValueStore};

pub const DASHBOARD_EVENTS: usize = 3;
pub const DASHBOARD_TASKS: usize = 5;

fn read_list<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Result<Option<Vec<T>>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

fn write_list<T: Serialize>(storage: &dyn KeyValueStore, key: &str, items: &[T]) {
    let result: Result<()> = serde_json::to_string(items)
        .map_err(Into::into)
        .and_then(|json| storage.set(key, &json));
    if let Err(e) = result {
        log::error!("Failed to persist {}: {}", key, e);
    }
}

// ─── Tasks ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded; 0 when there are no tasks
    pub percent: u8,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

pub struct TaskStore {
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load saved tasks, or the sample list when nothing usable is stored.
    pub fn load(storage: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        let tasks = match read_list(storage.as_ref(), TASKS_KEY) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => Task::defaults(),
            Err(e) => {
                log::warn!("Discarding unreadable tasks: {}", e);
                Task::defaults()
            }
        };
        Self {
            storage,
            clock,
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All three fields are required. Returns the new task.
    pub fn add(&mut self, title: &str, subject: &str, due_date: &str) -> Option<Task> {
        let (title, subject, due_date) = (title.trim(), subject.trim(), due_date.trim());
        if title.is_empty() || subject.is_empty() || due_date.is_empty() {
            return None;
        }
        let task = Task {
            id: self.next_id(),
            title: title.to_string(),
            subject: subject.to_string(),
            due_date: due_date.to_string(),
            completed: false,
        };
        self.tasks.push(task.clone());
        self.save();
        Some(task)
    }

    /// Replace the text fields of an existing task. Blank fields are rejected.
    pub fn edit(&mut self, id: u64, title: &str, subject: &str, due_date: &str) -> bool {
        let (title, subject, due_date) = (title.trim(), subject.trim(), due_date.trim());
        if title.is_empty() || subject.is_empty() || due_date.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.title = title.to_string();
        task.subject = subject.to_string();
        task.due_date = due_date.to_string();
        self.save();
        true
    }

    pub fn toggle(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.save();
        true
    }

    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(idx);
        self.save();
        Some(task)
    }

    /// Case-insensitive match on title or subject. An empty term matches all.
    pub fn search(&self, term: &str) -> Vec<&Task> {
        let term = term.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&term) || t.subject.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress::of(&self.tasks)
    }

    fn next_id(&self) -> u64 {
        let now = self.clock.now_ms().max(0) as u64;
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(max + 1)
    }

    fn save(&self) {
        write_list(self.storage.as_ref(), TASKS_KEY, &self.tasks);
    }
}

// ─── Important days ──────────────────────────────────────────

pub struct CalendarStore {
    storage: Rc<dyn KeyValueStore>,
    days: Vec<ImportantDay>,
}

impl CalendarStore {
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let days = match read_list(storage.as_ref(), IMPORTANT_DAYS_KEY) {
            Ok(Some(days)) => days,
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Discarding unreadable important days: {}", e);
                Vec::new()
            }
        };
        Self { storage, days }
    }

    pub fn days(&self) -> &[ImportantDay] {
        &self.days
    }

    pub fn add(&mut self, date: DateTime<Utc>, title: &str, description: Option<String>) -> ImportantDay {
        let day = ImportantDay::new(date, title, description);
        self.days.push(day.clone());
        self.save();
        day
    }

    pub fn update(&mut self, id: &str, patch: ImportantDayPatch) -> bool {
        let Some(day) = self.days.iter_mut().find(|d| d.id == id) else {
            return false;
        };
        if let Some(date) = patch.date {
            day.date = date;
        }
        if let Some(title) = patch.title {
            day.title = title;
        }
        if let Some(description) = patch.description {
            day.description = description;
        }
        self.save();
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.days.len();
        self.days.retain(|d| d.id != id);
        if self.days.len() == before {
            return false;
        }
        self.save();
        true
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Option<&ImportantDay> {
        self.days.iter().find(|d| d.day() == date)
    }

    /// Mark `date`, replacing whatever was already marked on it.
    /// Dates before `today` cannot be marked.
    pub fn mark(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
        title: &str,
        description: Option<String>,
    ) -> Option<ImportantDay> {
        if date < today || title.trim().is_empty() {
            return None;
        }
        let stamp = ImportantDay::stamp_for(date)?;
        let existing = self.get_by_date(date).map(|d| d.id.clone());
        match existing {
            Some(id) => {
                self.update(
                    &id,
                    ImportantDayPatch {
                        date: Some(stamp),
                        title: Some(title.trim().to_string()),
                        description: Some(description),
                    },
                );
                self.days.iter().find(|d| d.id == id).cloned()
            }
            None => Some(self.add(stamp, title.trim(), description)),
        }
    }

    /// Days on or after `today`, soonest first
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&ImportantDay> {
        let mut days: Vec<&ImportantDay> = self.days.iter().filter(|d| d.day() >= today).collect();
        days.sort_by_key(|d| d.date);
        days
    }

    /// Drop days strictly before `today`. Returns how many were removed.
    pub fn prune_past(&mut self, today: NaiveDate) -> usize {
        let before = self.days.len();
        self.days.retain(|d| d.day() >= today);
        let removed = before - self.days.len();
        if removed > 0 {
            log::info!("Pruned {} past important days", removed);
            self.save();
        }
        removed
    }

    fn save(&self) {
        write_list(self.storage.as_ref(), IMPORTANT_DAYS_KEY, &self.days);
    }
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub progress: Progress,
    pub upcoming_events: Vec<ImportantDay>,
    pub pending_tasks: Vec<Task>,
    pub completed_tasks: Vec<Task>,
}

impl DashboardSummary {
    pub fn build(tasks: &TaskStore, calendar: &CalendarStore, today: NaiveDate) -> Self {
        Self {
            progress: tasks.progress(),
            upcoming_events: calendar
                .upcoming(today)
                .into_iter()
                .take(DASHBOARD_EVENTS)
                .cloned()
                .collect(),
            pending_tasks: tasks
                .tasks()
                .iter()
                .filter(|t| !t.completed)
                .take(DASHBOARD_TASKS)
                .cloned()
                .collect(),
            completed_tasks: tasks
                .tasks()
                .iter()
                .filter(|t| t.completed)
                .take(DASHBOARD_TASKS)
                .cloned()
                .collect(),
        }
    }
}
