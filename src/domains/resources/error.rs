//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No registered resource has the requested URI.
    #[error("Resource with URI '{0}' not found")]
    NotFound(String),

    /// The resource content could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_uri() {
        let err = ResourceError::not_found("mcp://nowhere");
        assert_eq!(err.to_string(), "Resource with URI 'mcp://nowhere' not found");
        assert!(err.is_not_found());
        assert!(!ResourceError::internal("x").is_not_found());
    }
}
