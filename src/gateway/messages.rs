//! Gateway message types for backend communication.
//!
//! Uses JSON Lines (newline-delimited JSON) over Unix stream socket.
//! Message schema uses familiar field names (id, method, params, result, error)
//! but does NOT implement JSON-RPC 2.0 specification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent to a backend gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// Unique request ID for correlating responses.
    pub id: u64,
    /// Operation name (e.g., "searchPeopleByName").
    pub method: String,
    /// Operation arguments as JSON value.
    #[serde(default)]
    pub params: Value,
}

impl GatewayRequest {
    /// Create a new request with the given method and params.
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Create a request with no parameters.
    pub fn no_params(id: u64, method: impl Into<String>) -> Self {
        Self::new(id, method, Value::Object(Default::default()))
    }
}

/// Response sent back by a gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Request ID this response corresponds to.
    pub id: u64,
    /// Result payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GatewayResult>,
    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GatewayError>,
}

impl GatewayResponse {
    /// Create a success response.
    pub fn success(id: u64, result: GatewayResult) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: u64, error: GatewayError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response indicates success.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result payload of a gateway call: a sequence of typed content items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayResult {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl GatewayResult {
    /// Build a result holding a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
        }
    }

    /// Concatenate every text item, joined by newlines. Non-text items are
    /// discarded.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter(|item| item.kind == "text")
            .filter_map(|item| item.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One typed content item in a gateway result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentItem {
    /// Create a text content item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// Error details in a gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
}

impl GatewayError {
    /// Create a new error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Method not found error (-32601).
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown method: {}", method.into()),
        )
    }

    /// Internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }
}

/// Gateway error codes.
pub struct ErrorCode;

impl ErrorCode {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_roundtrip() {
        let req = GatewayRequest::new(7, "searchPeopleByName", json!({"name": "Jane Doe"}));
        let line = serde_json::to_string(&req).unwrap();
        let back: GatewayRequest = serde_json::from_str(&line).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.method, "searchPeopleByName");
        assert_eq!(back.params["name"], "Jane Doe");
    }

    #[test]
    fn test_request_no_params() {
        let req = GatewayRequest::no_params(1, "ping");
        assert!(req.params.is_object());
        assert!(req.params.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_request_missing_params_defaults() {
        let back: GatewayRequest = serde_json::from_str(r#"{"id":1,"method":"ping"}"#).unwrap();
        assert!(back.params.is_null());
    }

    #[test]
    fn test_response_success() {
        let resp = GatewayResponse::success(3, GatewayResult::text("Found: Jane Doe, ID: 42"));
        assert!(resp.is_success());
        assert!(resp.error.is_none());
        assert_eq!(
            resp.result.unwrap().joined_text(),
            "Found: Jane Doe, ID: 42"
        );
    }

    #[test]
    fn test_response_error() {
        let resp = GatewayResponse::error(3, GatewayError::method_not_found("deletePerson"));
        assert!(!resp.is_success());
        let err = resp.error.unwrap();
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
        assert!(err.message.contains("deletePerson"));
    }

    #[test]
    fn test_error_constructors() {
        assert_eq!(
            GatewayError::invalid_params("blank name").code,
            ErrorCode::INVALID_PARAMS
        );
        assert_eq!(
            GatewayError::internal_error("db down").code,
            ErrorCode::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_joined_text_discards_non_text_items() {
        let result = GatewayResult {
            content: vec![
                ContentItem::text("line one"),
                ContentItem {
                    kind: "image".to_string(),
                    text: None,
                },
                ContentItem::text("line two"),
            ],
        };
        assert_eq!(result.joined_text(), "line one\nline two");
    }

    #[test]
    fn test_joined_text_empty_content() {
        assert_eq!(GatewayResult::default().joined_text(), "");
    }

    #[test]
    fn test_response_serde_skips_absent_fields() {
        let resp = GatewayResponse::success(1, GatewayResult::text("ok"));
        let line = serde_json::to_string(&resp).unwrap();
        assert!(!line.contains("error"));

        let resp = GatewayResponse::error(1, GatewayError::internal_error("boom"));
        let line = serde_json::to_string(&resp).unwrap();
        assert!(!line.contains("result"));
    }
}
