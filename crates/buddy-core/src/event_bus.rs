//! Chat event queue between the controller and the UI.
//!
//! Single-threaded, buffered until the next frame drains it. Consecutive
//! `SessionsChanged` notices collapse into one, since the UI re-reads the
//! whole session list either way.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use buddy_types::event::ChatEvent;

/// Clones share one queue
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.inner.borrow_mut();
        if event == ChatEvent::SessionsChanged && queue.back() == Some(&ChatEvent::SessionsChanged) {
            return;
        }
        queue.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drain all pending events. Called by the UI layer each frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
