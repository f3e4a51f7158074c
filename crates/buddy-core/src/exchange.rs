//! Message exchange: one user message in, exactly one assistant message out.
//!
//! Failures never escape: each one is mapped onto [`ExchangeFailure`] and
//! the matching fixed text becomes the assistant message.

use std::rc::Rc;

use buddy_types::{
    config::AssistantConfig,
    event::ExchangeFailure,
    message::Message,
    session::Session,
};
use crate::ports::{CompletionPort, CompletionRequest};

pub const TITLE_PREFIX_CHARS: usize = 25;
pub const TITLE_ELLIPSIS: &str = "...";

/// Outcome of the assistant half of an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: Message,
    pub failure: Option<ExchangeFailure>,
}

impl Reply {
    fn failed(failure: ExchangeFailure) -> Self {
        Self {
            message: Message::assistant(failure.user_message()),
            failure: Some(failure),
        }
    }
}

#[derive(Clone)]
pub struct MessageExchange {
    completion: Rc<dyn CompletionPort>,
    config: AssistantConfig,
}

impl MessageExchange {
    pub fn new(completion: Rc<dyn CompletionPort>, config: AssistantConfig) -> Self {
        Self { completion, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AssistantConfig) {
        self.config = config;
    }

    pub fn set_completion(&mut self, completion: Rc<dyn CompletionPort>) {
        self.completion = completion;
    }

    /// Whitespace-only input is ignored rather than sent
    pub fn accepts(text: &str) -> bool {
        !text.trim().is_empty()
    }

    /// Append the user's message, retitling the session on its first user
    /// message. Returns false (and leaves the session untouched) for blank text.
    pub fn append_user(session: &mut Session, text: &str) -> bool {
        if !Self::accepts(text) {
            return false;
        }
        if session.messages.len() == 1 {
            session.title = title_from_prompt(text);
        }
        session.messages.push(Message::user(text));
        true
    }

    /// Produce the assistant message for `prompt`. Makes at most one call.
    pub async fn reply(&self, prompt: &str) -> Reply {
        let Some(api_key) = self.config.credential() else {
            log::warn!("No API key configured, skipping completion call");
            return Reply::failed(ExchangeFailure::MissingCredential);
        };

        let req = CompletionRequest {
            prompt: prompt.to_string(),
            model: self.config.model.clone(),
            api_key: api_key.to_string(),
        };

        match self.completion.generate(req).await {
            Ok(text) => Reply {
                message: Message::assistant(text),
                failure: None,
            },
            Err(e) => {
                let failure = ExchangeFailure::classify(&e.to_string());
                log::warn!(
                    "Completion via {} failed ({}): {}",
                    self.completion.provider_name(),
                    failure.label(),
                    e
                );
                Reply::failed(failure)
            }
        }
    }

    /// Full exchange against one session. Returns None when `text` was ignored.
    pub async fn send(&self, session: &mut Session, text: &str) -> Option<Reply> {
        if !Self::append_user(session, text) {
            return None;
        }
        let reply = self.reply(text).await;
        session.messages.push(reply.message.clone());
        Some(reply)
    }
}

/// First 25 characters plus "...", applied even when the text is shorter.
pub fn title_from_prompt(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_PREFIX_CHARS).collect();
    title.push_str(TITLE_ELLIPSIS);
    title
}
