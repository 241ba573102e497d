//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// `NotFound` is the only dispatch-level variant; every other variant is
/// raised by a handler and ends up embedded in the tool result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A required argument is absent.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The tool execution failed.
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

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error comes from the dispatch tier rather than a handler.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_tool() {
        let err = ToolError::not_found("nope");
        assert_eq!(err.to_string(), "Tool 'nope' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_handler_errors_are_not_dispatch_errors() {
        assert!(!ToolError::invalid_arguments("x").is_not_found());
        assert_eq!(
            ToolError::missing_argument("operation").to_string(),
            "Missing required argument: operation"
        );
    }
}
