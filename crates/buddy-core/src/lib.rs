//! StudyBuddy core: state managers behind the browser UI.
//!
//! Everything here is plain Rust. Storage and the completion API are reached
//! only through the traits in [`ports`]; adapters live in `buddy-platform`.

pub mod ports;
pub mod event_bus;
pub mod session_store;
pub mod exchange;
pub mod controller;
pub mod planner;
pub mod mood;
pub mod config_store;
