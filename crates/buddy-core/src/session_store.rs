//! Session store: loads and saves the chat session list.

use std::cell::Cell;
use std::rc::Rc;

use buddy_types::{
    Result,
    config::SESSIONS_KEY,
    session::{Session, SessionCollection},
};
use crate::ports::{Clock, KeyValueStore};

const ID_PREFIX: &str = "session_";

pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    /// Millisecond stamp of the newest id handed out or seen on load
    last_id_ms: Cell<i64>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            last_id_ms: Cell::new(0),
        }
    }

    /// Read the persisted sessions. Missing, unreadable, or empty state
    /// yields a single default session.
    pub fn load(&self) -> SessionCollection {
        match self.read() {
            Ok(Some(collection)) if !collection.is_empty() => {
                for session in collection.iter() {
                    if let Some(ms) = id_millis(&session.id) {
                        self.last_id_ms.set(self.last_id_ms.get().max(ms));
                    }
                }
                log::info!(
                    "Loaded {} chat sessions from {}",
                    collection.len(),
                    self.storage.backend_name()
                );
                collection
            }
            Ok(Some(_)) => {
                log::debug!("Persisted session list is empty, starting fresh");
                self.default_collection()
            }
            Ok(None) => self.default_collection(),
            Err(e) => {
                log::warn!("Discarding unreadable chat sessions: {}", e);
                self.default_collection()
            }
        }
    }

    fn read(&self) -> Result<Option<SessionCollection>> {
        let Some(raw) = self.storage.get(SESSIONS_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Write the whole collection.
    pub fn save(&self, collection: &SessionCollection) -> Result<()> {
        let json = serde_json::to_string(collection)?;
        self.storage.set(SESSIONS_KEY, &json)
    }

    /// A new session with a fresh id and the seed greeting
    pub fn create_session(&self) -> Session {
        Session::new(self.next_id())
    }

    fn default_collection(&self) -> SessionCollection {
        SessionCollection::single(self.create_session())
    }

    /// Time-based, but never repeats or goes backwards within the process
    fn next_id(&self) -> String {
        let ms = self.clock.now_ms().max(self.last_id_ms.get() + 1);
        self.last_id_ms.set(ms);
        format!("{}{}", ID_PREFIX, ms)
    }
}

fn id_millis(id: &str) -> Option<i64> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}
