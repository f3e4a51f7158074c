use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BuddyError {
    /// The completion API answered with a non-2xx status
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The completion API answered 2xx but the body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl From<serde_json::Error> for BuddyError {
    fn from(e: serde_json::Error) -> Self {
        BuddyError::Serialization(e.to_string())
    }
}
