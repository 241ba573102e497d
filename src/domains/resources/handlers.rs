//! Resource handlers module.
//!
//! Resource metadata, the read envelope and the trait that binds executable
//! logic to a resource URI.

use serde::{Deserialize, Serialize};

use super::error::ResourceError;
use crate::domains::tools::Arguments;

/// Metadata about a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// The URI of the resource. Unique within a registry.
    pub uri: String,

    /// The display name of the resource.
    pub name: String,

    /// A description of the resource.
    pub description: String,

    /// The MIME type of the resource content.
    pub mime_type: String,
}

impl ResourceDefinition {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// One content item of a resource read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// The result of reading a resource: `{"contents": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

impl ReadResourceResult {
    /// A result holding a single text item.
    pub fn text(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            contents: vec![ResourceContents {
                uri: uri.into(),
                mime_type: mime_type.into(),
                text: text.into(),
            }],
        }
    }
}

/// Trait for implementing resource handlers.
///
/// Reads are invoked with an empty argument set; the map is kept in the
/// signature so handlers share the tool handlers' calling shape.
pub trait ResourceHandler: Send + Sync {
    fn read(&self, uri: &str, arguments: &Arguments) -> Result<ReadResourceResult, ResourceError>;
}

impl<F> ResourceHandler for F
where
    F: Fn(&str, &Arguments) -> Result<ReadResourceResult, ResourceError> + Send + Sync,
{
    fn read(&self, uri: &str, arguments: &Arguments) -> Result<ReadResourceResult, ResourceError> {
        self(uri, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_wire_shape() {
        let definition = ResourceDefinition::new("mcp://x", "X", "An x", "text/plain");
        assert_eq!(
            serde_json::to_value(definition).unwrap(),
            json!({
                "uri": "mcp://x",
                "name": "X",
                "description": "An x",
                "mimeType": "text/plain"
            })
        );
    }

    #[test]
    fn test_read_result_wire_shape() {
        let result = ReadResourceResult::text("mcp://x", "text/plain", "hello");
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({
                "contents": [{ "uri": "mcp://x", "mimeType": "text/plain", "text": "hello" }]
            })
        );
    }
}
