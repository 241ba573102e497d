//! Resource Registry - central registration of all resources.
//!
//! Resources are kept in registration order and resolved by a linear scan
//! over their URIs; the registry only ever holds a handful of entries.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::error::ResourceError;
use super::handlers::{ReadResourceResult, ResourceDefinition, ResourceHandler};
use crate::domains::tools::{Arguments, panic_message};

/// A registered resource: its metadata and the handler bound to it.
#[derive(Clone)]
pub struct ResourceEntry {
    pub definition: ResourceDefinition,
    pub handler: Arc<dyn ResourceHandler>,
}

impl std::fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("uri", &self.definition.uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: Vec<ResourceEntry>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under its URI, replacing any entry with the same URI.
    pub fn register(
        &mut self,
        definition: ResourceDefinition,
        handler: impl ResourceHandler + 'static,
    ) {
        let entry = ResourceEntry {
            definition,
            handler: Arc::new(handler),
        };

        match self
            .entries
            .iter_mut()
            .find(|e| e.definition.uri == entry.definition.uri)
        {
            Some(existing) => {
                info!("Replacing resource: {}", entry.definition.uri);
                *existing = entry;
            }
            None => {
                info!("Registering resource: {}", entry.definition.uri);
                self.entries.push(entry);
            }
        }
    }

    /// Look up a resource by URI.
    pub fn lookup(&self, uri: &str) -> Result<&ResourceEntry, ResourceError> {
        self.entries
            .iter()
            .find(|e| e.definition.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))
    }

    /// All resource definitions, in registration order.
    pub fn list(&self) -> Vec<ResourceDefinition> {
        self.entries.iter().map(|e| e.definition.clone()).collect()
    }

    /// Get the list of all resource URIs.
    pub fn resource_uris(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.definition.uri.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a resource by URI.
    ///
    /// The handler is invoked with an empty argument set and its result is
    /// returned unchanged. A panicking handler is reported as an internal error.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self.lookup(uri).inspect_err(|_| {
            warn!("Unknown resource requested: {}", uri);
        })?;

        debug!("Reading resource: {}", uri);

        let arguments = Arguments::new();
        match panic::catch_unwind(AssertUnwindSafe(|| entry.handler.read(uri, &arguments))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Resource {} panicked: {}", uri, message);
                Err(ResourceError::internal(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_text(text: &'static str) -> impl ResourceHandler {
        move |uri: &str, _: &Arguments| -> Result<ReadResourceResult, ResourceError> {
            Ok(ReadResourceResult::text(uri, "text/plain", text))
        }
    }

    fn definition(uri: &str) -> ResourceDefinition {
        ResourceDefinition::new(uri, "Test", "A test resource", "text/plain")
    }

    #[test]
    fn test_read_existing_resource() {
        let mut registry = ResourceRegistry::new();
        registry.register(definition("mcp://a"), static_text("alpha"));
        registry.register(definition("mcp://b"), static_text("beta"));

        let result = registry.read_resource("mcp://b").unwrap();
        assert_eq!(result.contents[0].text, "beta");
        assert_eq!(result.contents[0].uri, "mcp://b");
    }

    #[test]
    fn test_read_nonexistent_resource() {
        let registry = ResourceRegistry::new();
        let err = registry.read_resource("mcp://server/nonexistent").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_in_registration_order() {
        let mut registry = ResourceRegistry::new();
        registry.register(definition("mcp://z"), static_text("z"));
        registry.register(definition("mcp://a"), static_text("a"));
        assert_eq!(registry.resource_uris(), vec!["mcp://z", "mcp://a"]);
    }

    #[test]
    fn test_register_same_uri_replaces() {
        let mut registry = ResourceRegistry::new();
        registry.register(definition("mcp://a"), static_text("old"));
        registry.register(definition("mcp://a"), static_text("new"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.read_resource("mcp://a").unwrap().contents[0].text, "new");
    }

    #[test]
    fn test_handler_panic_is_internal_error() {
        let mut registry = ResourceRegistry::new();
        registry.register(
            definition("mcp://boom"),
            |_: &str, _: &Arguments| -> Result<ReadResourceResult, ResourceError> {
                panic!("resource exploded")
            },
        );
        let err = registry.read_resource("mcp://boom").unwrap_err();
        assert!(matches!(err, ResourceError::Internal(ref m) if m == "resource exploded"));
    }
}
