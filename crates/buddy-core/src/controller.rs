//! Chat controller: reacts to user actions on the chat widget.
//!
//! Owns the session list, the active-session pointer and the busy flag.
//! All state sits behind `Cell`/`RefCell` so the controller can be shared as
//! `Rc<ChatController>` with `spawn_local` tasks; no borrow is ever held
//! across the completion await.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use buddy_types::{
    config::AssistantConfig,
    event::{ChatEvent, ExchangeFailure, SendRejection},
    session::{Session, SessionCollection, SessionSummary},
};
use crate::event_bus::EventBus;
use crate::exchange::MessageExchange;
use crate::ports::{Clock, CompletionPort};
use crate::session_store::SessionStore;

/// Read-only view handed to presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub sessions: Vec<Session>,
    pub active_session_id: String,
    pub is_busy: bool,
}

/// What happened to a `send_message` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange ran and its assistant message was appended
    Sent { failure: Option<ExchangeFailure> },
    /// Blank input
    Ignored,
    /// Another exchange is still in flight
    Busy,
    /// Too soon after the previous send
    CoolingDown,
    /// The session was deleted while the reply was pending; reply discarded
    Orphaned,
}

/// Sets the busy flag for its lifetime
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct ChatController {
    store: SessionStore,
    exchange: RefCell<MessageExchange>,
    clock: Rc<dyn Clock>,
    event_bus: EventBus,
    sessions: RefCell<SessionCollection>,
    active_id: RefCell<String>,
    busy: Cell<bool>,
    last_send_ms: Cell<Option<i64>>,
}

impl ChatController {
    /// Load persisted sessions and activate the first one.
    pub fn new(
        store: SessionStore,
        exchange: MessageExchange,
        clock: Rc<dyn Clock>,
        event_bus: EventBus,
    ) -> Self {
        let mut sessions = store.load();
        let active_id = match sessions.first() {
            Some(s) => s.id.clone(),
            None => {
                let fresh = store.create_session();
                let id = fresh.id.clone();
                sessions.push(fresh);
                id
            }
        };

        Self {
            store,
            exchange: RefCell::new(exchange),
            clock,
            event_bus,
            sessions: RefCell::new(sessions),
            active_id: RefCell::new(active_id),
            busy: Cell::new(false),
            last_send_ms: Cell::new(None),
        }
    }

    // ─── Projection ──────────────────────────────────────────

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            sessions: self.sessions.borrow().as_slice().to_vec(),
            active_session_id: self.active_id.borrow().clone(),
            is_busy: self.busy.get(),
        }
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.sessions.borrow().summaries()
    }

    pub fn active_session_id(&self) -> String {
        self.active_id.borrow().clone()
    }

    pub fn active_session(&self) -> Session {
        let sessions = self.sessions.borrow();
        let active = self.active_id.borrow();
        sessions
            .get(&active)
            .or_else(|| sessions.first())
            .cloned()
            .unwrap_or_else(|| self.store.create_session())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn config(&self) -> AssistantConfig {
        self.exchange.borrow().config().clone()
    }

    /// The exchange as currently configured, for one-off prompts outside a session
    pub fn exchange(&self) -> MessageExchange {
        self.exchange.borrow().clone()
    }

    // ─── Configuration ───────────────────────────────────────

    pub fn set_config(&self, config: AssistantConfig) {
        self.exchange.borrow_mut().set_config(config);
    }

    pub fn set_completion(&self, completion: Rc<dyn CompletionPort>) {
        self.exchange.borrow_mut().set_completion(completion);
    }

    // ─── User actions ────────────────────────────────────────

    /// Prepend a fresh session and make it active. Returns its id.
    pub fn new_session(&self) -> String {
        let session = self.store.create_session();
        let id = session.id.clone();
        self.sessions.borrow_mut().prepend(session);
        *self.active_id.borrow_mut() = id.clone();
        log::debug!("Created chat session {}", id);
        self.changed();
        id
    }

    /// Activate `id`. Unknown ids are ignored.
    pub fn select_session(&self, id: &str) -> bool {
        if !self.sessions.borrow().contains(id) {
            log::debug!("Ignoring select of unknown session {}", id);
            return false;
        }
        *self.active_id.borrow_mut() = id.to_string();
        self.event_bus.emit(ChatEvent::SessionsChanged);
        true
    }

    /// Remove `id`. The collection is refilled with a fresh session if this
    /// empties it, and the active pointer moves to the first remaining session
    /// when the active one is deleted.
    pub fn delete_session(&self, id: &str) -> bool {
        {
            let mut sessions = self.sessions.borrow_mut();
            if sessions.remove(id).is_none() {
                return false;
            }

            let mut active = self.active_id.borrow_mut();
            if sessions.is_empty() {
                let fresh = self.store.create_session();
                *active = fresh.id.clone();
                sessions.push(fresh);
            } else if active.as_str() == id {
                if let Some(first) = sessions.first() {
                    *active = first.id.clone();
                }
            }
        }
        log::debug!("Deleted chat session {}", id);
        self.changed();
        true
    }

    /// Send `text` in the active session and wait for the assistant message.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if self.busy.get() {
            log::debug!("Send rejected: exchange already in flight");
            return self.reject(text, SendRejection::Busy);
        }
        if !MessageExchange::accepts(text) {
            return SendOutcome::Ignored;
        }

        let now = self.clock.now_ms();
        let cooldown = self.exchange.borrow().config().send_cooldown_ms as i64;
        if let Some(last) = self.last_send_ms.get() {
            if now - last < cooldown {
                log::debug!("Send rejected: cooling down");
                return self.reject(text, SendRejection::CoolingDown);
            }
        }

        let _busy = BusyGuard::acquire(&self.busy);

        // Bind the exchange to the session active right now
        let session_id = self.active_id.borrow().clone();
        {
            let mut sessions = self.sessions.borrow_mut();
            let Some(session) = sessions.get_mut(&session_id) else {
                return SendOutcome::Ignored;
            };
            if !MessageExchange::append_user(session, text) {
                return SendOutcome::Ignored;
            }
        }
        self.last_send_ms.set(Some(now));
        self.changed();
        self.event_bus.emit(ChatEvent::ExchangeStarted {
            session_id: session_id.clone(),
        });

        let exchange = self.exchange.borrow().clone();
        let reply = exchange.reply(text).await;

        let delivered = match self.sessions.borrow_mut().get_mut(&session_id) {
            Some(session) => {
                session.messages.push(reply.message);
                true
            }
            None => false,
        };
        self.event_bus.emit(ChatEvent::ExchangeFinished {
            session_id: session_id.clone(),
            failure: reply.failure,
        });
        if !delivered {
            log::warn!("Session {} was deleted before its reply arrived", session_id);
            return SendOutcome::Orphaned;
        }

        self.changed();
        SendOutcome::Sent {
            failure: reply.failure,
        }
    }

    /// Hand non-blank text back to the UI so it isn't lost
    fn reject(&self, text: &str, reason: SendRejection) -> SendOutcome {
        if MessageExchange::accepts(text) {
            self.event_bus.emit(ChatEvent::SendRejected {
                text: text.to_string(),
                reason,
            });
        }
        match reason {
            SendRejection::Busy => SendOutcome::Busy,
            SendRejection::CoolingDown => SendOutcome::CoolingDown,
        }
    }

    /// Persist and notify after a mutation
    fn changed(&self) {
        if let Err(e) = self.store.save(&self.sessions.borrow()) {
            log::error!("Failed to persist chat sessions: {}", e);
        }
        self.event_bus.emit(ChatEvent::SessionsChanged);
    }
}
