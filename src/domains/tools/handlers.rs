//! Tool handler abstraction and the result envelope.
//!
//! Every tool is a value implementing [`ToolHandler`]. Handlers receive the
//! untyped argument map exactly as the client sent it and are responsible for
//! their own validation. The helpers at the bottom of this module implement
//! the lenient argument policy shared by the built-in tools.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::error::ToolError;

/// Untyped arguments passed to a handler.
pub type Arguments = serde_json::Map<String, Value>;

/// A single content item of a successful tool result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Envelope returned by a tool invocation.
///
/// Serializes as `{"content": [...], "isError": false}` on success and as
/// `{"error": "..."}` on failure. The two shapes never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Success(Vec<Content>),
    Failure(String),
}

impl ToolResult {
    /// A successful result with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(vec![Content::text(text)])
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn content(&self) -> &[Content] {
        match self {
            Self::Success(content) => content,
            Self::Failure(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Text of the first content item, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content().first().map(Content::as_text)
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Success(content) => {
                map.serialize_entry("content", content)?;
                map.serialize_entry("isError", &false)?;
            }
            Self::Failure(message) => {
                map.serialize_entry("error", message)?;
            }
        }
        map.end()
    }
}

/// Executable logic bound to a tool name.
///
/// Semantic failures (bad operation, division by zero) are returned as
/// `Ok(ToolResult::Failure(..))`. An `Err` is an unexpected fault; the
/// dispatcher converts it into a failure result as well.
pub trait ToolHandler: Send + Sync {
    fn call(&self, arguments: &Arguments) -> Result<ToolResult, ToolError>;
}

impl<F> ToolHandler for F
where
    F: Fn(&Arguments) -> Result<ToolResult, ToolError> + Send + Sync,
{
    fn call(&self, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        self(arguments)
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

/// Read a numeric argument, substituting `0` when it is absent or null.
///
/// The zero default is intentional: clients that omit an operand get a
/// result computed with zero rather than a validation error. Numeric strings
/// are accepted as well.
pub fn number_or_zero(arguments: &Arguments, key: &str) -> Result<f64, ToolError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ToolError::invalid_arguments(format!("'{key}' is out of range"))),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            ToolError::invalid_arguments(format!("could not convert '{s}' to a number for '{key}'"))
        }),
        Some(other) => Err(ToolError::invalid_arguments(format!(
            "'{key}' must be a number, got {other}"
        ))),
    }
}

/// Read an argument as display text.
///
/// Strings are returned as-is, other non-null scalars and structures are
/// rendered as JSON. Absent and null both yield `None`.
pub fn text_arg(arguments: &Arguments, key: &str) -> Option<String> {
    match arguments.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
