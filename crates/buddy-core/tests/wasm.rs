//! WASM-target tests for buddy-core.
//!
//! Runs the session store and chat controller under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen_test::*;

use buddy_core::controller::{ChatController, SendOutcome};
use buddy_core::event_bus::EventBus;
use buddy_core::exchange::MessageExchange;
use buddy_core::ports::*;
use buddy_core::session_store::SessionStore;
use buddy_types::config::AssistantConfig;
use buddy_types::event::ExchangeFailure;
use buddy_types::session::GREETING;
use buddy_types::{BuddyError, Result};

#[derive(Default)]
struct Kv {
    data: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for Kv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "wasm-test"
    }
}

struct FailingCompletion(&'static str);

#[async_trait(?Send)]
impl CompletionPort for FailingCompletion {
    async fn generate(&self, _req: CompletionRequest) -> Result<String> {
        Err(BuddyError::Api(self.0.to_string()))
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

fn controller(completion: Rc<dyn CompletionPort>) -> ChatController {
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let config = AssistantConfig {
        api_key: "k".to_string(),
        send_cooldown_ms: 0,
        ..AssistantConfig::default()
    };
    ChatController::new(
        SessionStore::new(Rc::new(Kv::default()), clock.clone()),
        MessageExchange::new(completion, config),
        clock,
        EventBus::new(),
    )
}

#[wasm_bindgen_test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.now_ms() > 1_577_836_800_000);
}

#[wasm_bindgen_test]
fn delete_only_session_refills() {
    let ctrl = controller(Rc::new(FailingCompletion("x")));
    let only = ctrl.active_session_id();
    ctrl.delete_session(&only);
    let snap = ctrl.snapshot();
    assert_eq!(snap.sessions.len(), 1);
    assert_ne!(snap.active_session_id, only);
    assert_eq!(snap.sessions[0].messages[0].text, GREETING);
}

#[wasm_bindgen_test]
async fn quota_failure_becomes_assistant_message() {
    let ctrl = controller(Rc::new(FailingCompletion("You exceeded your current quota")));
    let outcome = ctrl.send_message("Help me study").await;
    assert_eq!(
        outcome,
        SendOutcome::Sent {
            failure: Some(ExchangeFailure::QuotaExceeded)
        }
    );
    let session = ctrl.active_session();
    assert_eq!(session.messages.len(), 3);
    assert_eq!(session.title, "Help me study...");
    assert_eq!(
        session.messages[2].text,
        ExchangeFailure::QuotaExceeded.user_message()
    );
    assert!(!ctrl.is_busy());
}
