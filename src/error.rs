//! Error types for minicode
//!
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations. Tool failures have their own typed enum
//! ([`crate::tools::ToolError`]) because they follow a different path: they
//! are rendered to text and sent back to the completion service rather than
//! surfaced to the user.

use thiserror::Error;

use crate::tools::ToolError;

/// The primary error type for minicode operations.
#[derive(Error, Debug)]
pub enum MiniError {
    /// Configuration errors (missing credentials, bad environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion service errors (API failures, rate limits, bad responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Tool execution failures that escaped the tool-result path
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Agent loop failures (runaway tool rounds)
    #[error("Agent error: {0}")]
    Agent(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for minicode operations.
pub type Result<T> = std::result::Result<T, MiniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MiniError::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MiniError = io_err.into();
        assert!(matches!(err, MiniError::Io(_)));
    }

    #[test]
    fn test_error_from_tool() {
        let tool_err = ToolError::UnknownTool("frobnicate".to_string());
        let err: MiniError = tool_err.into();
        assert!(matches!(err, MiniError::Tool(_)));
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
