use serde::{Deserialize, Serialize};
use crate::message::Message;

pub const DEFAULT_TITLE: &str = "New Chat";
pub const GREETING: &str = "Hello! How can I help you with your studies today?";

/// One conversation thread with its own history and title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Session {
    /// A fresh session seeded with the assistant greeting
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            messages: vec![Message::assistant(GREETING)],
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            message_count: self.messages.len(),
        }
    }
}

/// Summary of a session for the sidebar listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub message_count: usize,
}

/// Ordered sessions, newest first. Persisted as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCollection {
    sessions: Vec<Session>,
}

impl SessionCollection {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    pub fn single(session: Session) -> Self {
        Self {
            sessions: vec![session],
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn as_slice(&self) -> &[Session] {
        &self.sessions
    }

    pub fn first(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// New sessions go to the front of the list
    pub fn prepend(&mut self, session: Session) {
        self.sessions.insert(0, session);
    }

    /// Append at the back (used when refilling an emptied collection)
    pub fn push(&mut self, session: Session) {
        self.sessions.push(session);
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        let idx = self.sessions.iter().position(|s| s.id == id)?;
        Some(self.sessions.remove(idx))
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.sessions.iter().map(Session::summary).collect()
    }
}
