//! Task list and calendar records shown on the dashboard.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub subject: String,
    /// Free-form, e.g. "Tomorrow at 3:00 PM"
    pub due_date: String,
    pub completed: bool,
}

impl Task {
    /// Sample tasks shown before the user has saved anything
    pub fn defaults() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                title: "Complete Math Homework".to_string(),
                subject: "Mathematics".to_string(),
                due_date: "Today at 5:00 PM".to_string(),
                completed: false,
            },
            Task {
                id: 2,
                title: "Read Chapter 5".to_string(),
                subject: "History".to_string(),
                due_date: "Tomorrow at 3:00 PM".to_string(),
                completed: false,
            },
            Task {
                id: 3,
                title: "Submit Science Project".to_string(),
                subject: "Science".to_string(),
                due_date: "Friday at 12:00 PM".to_string(),
                completed: true,
            },
        ]
    }
}

/// A marked day on the personal calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantDay {
    pub id: String,
    /// Serialized as an RFC 3339 string
    pub date: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ImportantDay {
    pub fn new(date: DateTime<Utc>, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title: title.into(),
            description,
        }
    }

    /// Local midnight of `date`, the instant a marked day is stored at.
    /// None when midnight does not exist locally (a DST gap).
    pub fn stamp_for(date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Calendar day in the local timezone
    pub fn day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

/// Partial update for an important day; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ImportantDayPatch {
    pub date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}
