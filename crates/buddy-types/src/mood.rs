//! Moods offered by the dashboard check-in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Stressed,
    Confused,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Stressed,
        Mood::Confused,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Stressed => "Stressed",
            Mood::Confused => "Confused",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Stressed => "😫",
            Mood::Confused => "🤔",
        }
    }

    /// Prompt sent to the completion service when this mood is picked
    pub fn prompt(&self) -> String {
        format!(
            "Give me a short motivational or emotional message for someone feeling {}.",
            self.label().to_lowercase()
        )
    }
}
