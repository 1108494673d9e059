//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool registration and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Registry lookup found no entry for the given name.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A call referenced a tool with no current registry entry.
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    /// A required parameter was absent from the call arguments.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter was present but not of the declared type.
    #[error("Parameter '{parameter}' must be a {expected}")]
    TypeMismatch {
        parameter: String,
        expected: &'static str,
    },

    /// A parameter specification passed to `add_tool` could not be used.
    #[error("Invalid parameter specification: {0}")]
    InvalidSpecification(String),

    /// The tool handler reported an application-level failure.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "unknown operation" error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    /// Create a new "missing parameter" error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new "type mismatch" error.
    pub fn type_mismatch(parameter: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            parameter: parameter.into(),
            expected,
        }
    }

    /// Create a new "invalid specification" error.
    pub fn invalid_specification(msg: impl Into<String>) -> Self {
        Self::InvalidSpecification(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error was raised before the handler ran (lookup or
    /// argument validation) rather than by the handler itself.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::UnknownOperation(_)
                | Self::MissingParameter(_)
                | Self::TypeMismatch { .. }
                | Self::InvalidSpecification(_)
        )
    }
}
