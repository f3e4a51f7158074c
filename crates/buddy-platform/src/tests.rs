#[cfg(test)]
mod tests {
    use crate::llm::gemini::*;
    use crate::storage::MemoryStorage;
    use buddy_core::ports::KeyValueStore;
    use buddy_types::config::{AssistantConfig, DEFAULT_MODEL};
    use buddy_types::event::ExchangeFailure;
    use buddy_types::BuddyError;

    // ─── Gemini request/response Tests ───────────────────────

    #[test]
    fn test_endpoint_default_base() {
        let provider = GeminiProvider::new(&AssistantConfig::default());
        assert_eq!(
            provider.endpoint(DEFAULT_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_endpoint_custom_base() {
        let config = AssistantConfig {
            api_base: Some("http://localhost:9000/".to_string()),
            ..AssistantConfig::default()
        };
        let provider = GeminiProvider::new(&config);
        assert_eq!(
            provider.endpoint("gemini-pro"),
            "http://localhost:9000/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("Help me study");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Help me study");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_response_first_candidate_verbatim() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "  Use flashcards.\n"}, {"text": "ignored"}], "role": "model"}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        assert_eq!(parse_generate_response(body).unwrap(), "  Use flashcards.\n");
    }

    #[test]
    fn test_parse_response_empty_candidates() {
        let err = parse_generate_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));
        assert_eq!(
            ExchangeFailure::classify(&err.to_string()),
            ExchangeFailure::TransientFailure
        );
    }

    #[test]
    fn test_parse_response_missing_candidates() {
        let err = parse_generate_response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_response_missing_parts() {
        let err = parse_generate_response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));

        let err = parse_generate_response(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_response_wrong_types() {
        let err = parse_generate_response(r#"{"candidates": "nope"}"#).unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));
        let err = parse_generate_response("<html>").unwrap_err();
        assert!(matches!(err, BuddyError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_body_invalid_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let err = error_from_body(400, body);
        assert_eq!(
            ExchangeFailure::classify(&err.to_string()),
            ExchangeFailure::InvalidCredential
        );
    }

    #[test]
    fn test_error_body_quota() {
        let body = r#"{"error": {"code": 429, "message": "You exceeded your current quota, please check your plan.", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = error_from_body(429, body);
        assert_eq!(
            ExchangeFailure::classify(&err.to_string()),
            ExchangeFailure::QuotaExceeded
        );
    }

    #[test]
    fn test_error_body_without_message_uses_status() {
        let err = error_from_body(503, "Service Unavailable");
        assert_eq!(err.to_string(), "API error: API request failed with status 503");
        let err = error_from_body(500, r#"{"error": {}}"#);
        assert!(err.to_string().contains("status 500"));
    }

    // ─── MemoryStorage Tests ─────────────────────────────────

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.backend_name(), "memory");
        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
        storage.remove("k").unwrap();
    }
}
