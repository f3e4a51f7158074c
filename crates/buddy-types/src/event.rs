use serde::{Deserialize, Serialize};

/// Why an exchange produced a substituted assistant message instead of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeFailure {
    MissingCredential,
    InvalidCredential,
    QuotaExceeded,
    /// Network errors, malformed JSON, empty candidate list, anything else
    TransientFailure,
}

impl ExchangeFailure {
    /// Map an error message from the completion call onto the taxonomy.
    /// Matching is on substrings of the message text.
    pub fn classify(message: &str) -> Self {
        if message.contains("API key") {
            ExchangeFailure::InvalidCredential
        } else if message.contains("quota") {
            ExchangeFailure::QuotaExceeded
        } else {
            ExchangeFailure::TransientFailure
        }
    }

    /// Text of the assistant message shown in place of a reply
    pub fn user_message(&self) -> &'static str {
        match self {
            ExchangeFailure::MissingCredential => {
                "Please configure your Gemini API key in Settings. See README for instructions."
            }
            ExchangeFailure::InvalidCredential => {
                "Invalid API key. Please check your configuration."
            }
            ExchangeFailure::QuotaExceeded => {
                "I'm feeling a bit overwhelmed! Please try again in a moment."
            }
            ExchangeFailure::TransientFailure => {
                "Sorry, I'm having a little trouble right now. Please try again later."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExchangeFailure::MissingCredential => "no API key",
            ExchangeFailure::InvalidCredential => "invalid API key",
            ExchangeFailure::QuotaExceeded => "quota exceeded",
            ExchangeFailure::TransientFailure => "service unavailable",
        }
    }
}

/// Why a send was turned away before anything was appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendRejection {
    /// An exchange is still in flight
    Busy,
    CoolingDown,
}

impl SendRejection {
    pub fn label(&self) -> &'static str {
        match self {
            SendRejection::Busy => "still answering",
            SendRejection::CoolingDown => "sending too fast",
        }
    }
}

/// Events emitted by the chat controller.
/// UI drains these each frame for status updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// Sessions were created, deleted, selected, or edited
    SessionsChanged,
    /// A user message was accepted and the completion call is in flight
    ExchangeStarted { session_id: String },
    /// The assistant message for an exchange has been appended
    ExchangeFinished {
        session_id: String,
        failure: Option<ExchangeFailure>,
    },
    /// A non-blank message was not sent; `text` is handed back to the input
    SendRejected {
        text: String,
        reason: SendRejection,
    },
}
