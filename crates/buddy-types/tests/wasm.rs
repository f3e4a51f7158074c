//! WASM-target tests for buddy-types.
//!
//! Runs the persisted-layout checks under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use buddy_types::message::*;
use buddy_types::event::*;
use buddy_types::config::*;
use buddy_types::session::*;
use buddy_types::planner::*;

#[wasm_bindgen_test]
fn message_sender_wire_names() {
    let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
    assert!(json.contains(r#""bot""#));
    let json = serde_json::to_string(&Message::user("hi")).unwrap();
    assert!(json.contains(r#""user""#));
}

#[wasm_bindgen_test]
fn session_collection_roundtrip_through_storage_text() {
    let raw = r#"[{"id":"session_1","title":"Help me study...","messages":[
        {"sender":"bot","text":"Hello!"},
        {"sender":"user","text":"Help me study"}]}]"#;
    let collection: SessionCollection = serde_json::from_str(raw).unwrap();
    assert_eq!(collection.len(), 1);
    let session = collection.get("session_1").unwrap();
    assert_eq!(session.messages.len(), 2);
    assert!(session.messages[1].is_user());
}

#[wasm_bindgen_test]
fn default_session_greets() {
    let session = Session::new("s".to_string());
    assert_eq!(session.messages[0].text, GREETING);
}

#[wasm_bindgen_test]
fn failure_classification() {
    assert_eq!(ExchangeFailure::classify("quota"), ExchangeFailure::QuotaExceeded);
    assert_eq!(ExchangeFailure::classify("bad API key"), ExchangeFailure::InvalidCredential);
    assert_eq!(ExchangeFailure::classify("boom"), ExchangeFailure::TransientFailure);
}

#[wasm_bindgen_test]
fn config_without_key_has_no_credential() {
    let config = AssistantConfig {
        api_key: String::new(),
        ..AssistantConfig::default()
    };
    assert!(config.credential().is_none());
}

#[wasm_bindgen_test]
fn important_day_uuid_ids() {
    let day = ImportantDay::new(chrono::Utc::now(), "Exam", Some("Room 4".to_string()));
    assert_eq!(day.id.len(), 36);
    assert_eq!(day.description.as_deref(), Some("Room 4"));
}
