//! Error types for refdesk
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in refdesk
#[derive(Debug, Error)]
pub enum RefdeskError {
    /// Network or endpoint failure talking to the LLM or a gateway
    #[error("Transport error: {0}")]
    Transport(String),

    /// LLM emitted a TOOL: directive whose argument object is not valid JSON
    #[error("Malformed tool directive: {0}")]
    MalformedIntent(String),

    /// Extracted tool name is not in the static catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments fail the per-tool schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Typed error returned by a backend gateway
    #[error("Gateway error for tool '{tool}' (code {code}): {message}")]
    Gateway {
        tool: String,
        code: i32,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for refdesk operations
pub type Result<T> = std::result::Result<T, RefdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let err = RefdeskError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_malformed_intent_error() {
        let err = RefdeskError::MalformedIntent("{name: Jane}".to_string());
        assert_eq!(err.to_string(), "Malformed tool directive: {name: Jane}");
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = RefdeskError::UnknownTool("deletePerson".to_string());
        assert_eq!(err.to_string(), "Unknown tool: deletePerson");
    }

    #[test]
    fn test_invalid_arguments_error() {
        let err = RefdeskError::InvalidArguments("missing required field: id".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid arguments: missing required field: id"
        );
    }

    #[test]
    fn test_gateway_error() {
        let err = RefdeskError::Gateway {
            tool: "getPersonById".to_string(),
            code: -32601,
            message: "method not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gateway error for tool 'getPersonById' (code -32601): method not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "socket missing");
        let err: RefdeskError = io_err.into();
        assert!(matches!(err, RefdeskError::Io(_)));
        assert!(err.to_string().contains("socket missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: RefdeskError = json_err.into();
        assert!(matches!(err, RefdeskError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(RefdeskError::UnknownTool("nope".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
