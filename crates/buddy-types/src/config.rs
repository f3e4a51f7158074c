use serde::{Deserialize, Serialize};

/// Storage keys. The first three match the layout the web app has always used.
pub const SESSIONS_KEY: &str = "chatSessions";
pub const IMPORTANT_DAYS_KEY: &str = "importantDays";
pub const TASKS_KEY: &str = "tasks";
pub const CONFIG_KEY: &str = "studybuddy:config";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_SEND_COOLDOWN_MS: u64 = 500;

/// Chat assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    /// Empty means "not configured"
    pub api_key: String,
    pub api_base: Option<String>,
    /// Minimum gap between two accepted sends
    pub send_cooldown_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: option_env!("GEMINI_API_KEY").unwrap_or_default().to_string(),
            api_base: None,
            send_cooldown_ms: DEFAULT_SEND_COOLDOWN_MS,
        }
    }
}

impl AssistantConfig {
    /// The credential, if one is configured
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn base_url(&self) -> &str {
        match self.api_base.as_deref() {
            Some(base) if !base.trim().is_empty() => base.trim_end_matches('/'),
            _ => DEFAULT_API_BASE,
        }
    }
}
