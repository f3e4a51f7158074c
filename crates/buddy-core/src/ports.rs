//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `buddy-core` (pure Rust).
//! Implementations live in `buddy-platform` (browser adapters).

use async_trait::async_trait;
use buddy_types::Result;

// ─── Completion Port ─────────────────────────────────────────

/// One prompt sent to the text-generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub api_key: String,
}

#[async_trait(?Send)]
pub trait CompletionPort {
    /// Send one prompt and return the generated text.
    /// Errors carry the service's message text so callers can classify them.
    async fn generate(&self, req: CompletionRequest) -> Result<String>;

    /// Name of this provider (for logging/debug)
    fn provider_name(&self) -> &str;
}

// ─── Key-Value Storage Port ──────────────────────────────────

/// Synchronous string storage, shaped after the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clock Port ──────────────────────────────────────────────

pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// Wall clock. `chrono` reads `Date.now()` on wasm32 via the `wasmbind` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
