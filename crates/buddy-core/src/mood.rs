//! Mood check-in: the user picks how they feel and gets one short
//! encouraging message back.
//!
//! Goes through the same [`MessageExchange`] as the chat, so failures are
//! classified and substituted the same way, but nothing is written to a
//! session. Picks share the chat's cooldown length and keep their own
//! timestamp. When picks overlap only the newest one's reply is shown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use buddy_types::{event::ExchangeFailure, mood::Mood};
use crate::exchange::MessageExchange;
use crate::ports::Clock;

/// What the dashboard shows for the check-in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoodSnapshot {
    pub selected: Option<Mood>,
    pub loading: bool,
    pub message: Option<String>,
    pub failure: Option<ExchangeFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodOutcome {
    Delivered { failure: Option<ExchangeFailure> },
    /// Too soon after the previous pick
    CoolingDown,
    /// A newer pick or a dismiss came in while this one was pending
    Superseded,
}

pub struct MoodLogger {
    clock: Rc<dyn Clock>,
    state: RefCell<MoodSnapshot>,
    last_pick_ms: Cell<Option<i64>>,
    generation: Cell<u64>,
}

impl MoodLogger {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            state: RefCell::new(MoodSnapshot::default()),
            last_pick_ms: Cell::new(None),
            generation: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> MoodSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub async fn pick(&self, mood: Mood, exchange: &MessageExchange) -> MoodOutcome {
        let now = self.clock.now_ms();
        let cooldown = exchange.config().send_cooldown_ms as i64;
        if let Some(last) = self.last_pick_ms.get() {
            if now - last < cooldown {
                log::debug!("Mood pick {} rejected: cooling down", mood.label());
                return MoodOutcome::CoolingDown;
            }
        }
        self.last_pick_ms.set(Some(now));
        let generation = self.bump();
        *self.state.borrow_mut() = MoodSnapshot {
            selected: Some(mood),
            loading: true,
            message: None,
            failure: None,
        };

        let reply = exchange.reply(&mood.prompt()).await;

        if self.generation.get() != generation {
            log::debug!("Dropping stale mood message for {}", mood.label());
            return MoodOutcome::Superseded;
        }
        let mut state = self.state.borrow_mut();
        state.loading = false;
        state.message = Some(reply.message.text);
        state.failure = reply.failure;
        MoodOutcome::Delivered {
            failure: reply.failure,
        }
    }

    /// Close the message; a reply still in flight is discarded
    pub fn dismiss(&self) {
        self.bump();
        *self.state.borrow_mut() = MoodSnapshot::default();
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }
}
