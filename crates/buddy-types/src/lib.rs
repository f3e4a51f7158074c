pub mod message;
pub mod event;
pub mod config;
pub mod error;
pub mod session;
pub mod planner;
pub mod mood;


pub use error::BuddyError;

pub type Result<T> = std::result::Result<T, BuddyError>;
