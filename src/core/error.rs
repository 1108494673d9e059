//! Error types and handling for the MCP server.
//!
//! Errors raised while building the server: a built-in tool that could not
//! be registered, or configuration that cannot be used.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_tool_error_converts() {
        let err: Error = ToolError::invalid_specification("tool name must not be empty").into();
        assert!(matches!(err, Error::Tool(ToolError::InvalidSpecification(_))));
        assert_eq!(
            err.to_string(),
            "Tool error: Invalid parameter specification: tool name must not be empty"
        );
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            Error::config("bad endpoint").to_string(),
            "Configuration error: bad endpoint"
        );
    }
}
