//! Google Gemini `generateContent` adapter.
//!
//! One POST per prompt, credential in the query string.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use buddy_core::ports::{CompletionPort, CompletionRequest};
use buddy_types::{BuddyError, Result, config::AssistantConfig};

pub struct GeminiProvider {
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait(?Send)]
impl CompletionPort for GeminiProvider {
    async fn generate(&self, req: CompletionRequest) -> Result<String> {
        let url = self.endpoint(&req.model);
        let body = build_request_body(&req.prompt);

        let response = Request::post(&url)
            .query([("key", req.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| BuddyError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| BuddyError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BuddyError::Network(e.to_string()))?;

        if !response.ok() {
            log::debug!("Gemini returned HTTP {}: {}", status, text);
            return Err(error_from_body(status, &text));
        }

        parse_generate_response(&text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// ─── API wire types ──────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

// ─── Serialization helpers ───────────────────────────────────

pub fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    })
}

/// `candidates[0].content.parts[0].text`, untouched
pub fn parse_generate_response(body: &str) -> Result<String> {
    let data: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| BuddyError::MalformedResponse(e.to_string()))?;

    let candidate = data
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| BuddyError::MalformedResponse("No response content received from API.".to_string()))?;

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| BuddyError::MalformedResponse("Candidate has no text part".to_string()))
}

/// Prefer the service's own `error.message`; fall back to the status code.
pub fn error_from_body(status: u16, body: &str) -> BuddyError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message);

    match message {
        Some(message) => BuddyError::Api(message),
        None => BuddyError::Api(format!("API request failed with status {}", status)),
    }
}
