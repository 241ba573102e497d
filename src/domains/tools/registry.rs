//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, in registration order
//! - Dispatch of tool calls to the registered handler
//! - Tool metadata for listing

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::definitions::{CalculatorTool, CurrentTimeTool, WeatherTool};
use super::error::ToolError;
use super::handlers::{Arguments, ToolHandler, ToolResult};
use super::schema::ToolDefinition;

// ============================================================================
// Tool Registry
// ============================================================================

/// A registered tool: its metadata and the handler bound to it.
#[derive(Clone)]
pub struct ToolEntry {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

/// Tool registry - manages all available tools.
///
/// Filled during startup, then shared read-only (behind an `Arc`) by every
/// request handler.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CalculatorTool::definition(), CalculatorTool);
        registry.register(CurrentTimeTool::definition(), CurrentTimeTool);
        registry.register(WeatherTool::definition(), WeatherTool);
        registry
    }

    /// Register a tool under its definition's name.
    ///
    /// An existing entry with the same name is replaced and keeps its
    /// position in the listing.
    pub fn register(&mut self, definition: ToolDefinition, handler: impl ToolHandler + 'static) {
        let name = definition.name.clone();
        let entry = ToolEntry {
            definition,
            handler: Arc::new(handler),
        };

        match self.index.get(&name) {
            Some(&position) => {
                info!("Replacing tool: {}", name);
                self.entries[position] = entry;
            }
            None => {
                info!("Registering tool: {}", name);
                self.index.insert(name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&ToolEntry, ToolError> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// All tool definitions, in registration order.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.entries.iter().map(|e| e.definition.clone()).collect()
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.definition.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Only an unknown name produces an `Err`. Whatever the handler does,
    /// returning an error or panicking included, ends up as a
    /// [`ToolResult`] carrying the fault's message.
    pub fn call_tool(&self, name: &str, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        let entry = self.lookup(name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", name);
        })?;

        debug!("Dispatching tool call: {}", name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.handler.call(arguments)));

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                ToolResult::failure(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Tool {} panicked: {}", name, message);
                ToolResult::failure(message)
            }
        };

        if let Some(message) = result.error() {
            debug!("Tool {} returned error: {}", name, message);
        }

        Ok(result)
    }
}

/// Extract a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::InputSchema;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::builtin();
        assert_eq!(
            registry.tool_names(),
            vec!["calculator", "get_current_time", "weather_info"]
        );
    }

    #[test]
    fn test_listed_names_match_keys() {
        let registry = ToolRegistry::builtin();
        for definition in registry.list() {
            let entry = registry.lookup(&definition.name).unwrap();
            assert_eq!(entry.definition.name, definition.name);
        }
    }

    #[test]
    fn test_registry_call_calculator() {
        let registry = ToolRegistry::builtin();
        let result = registry
            .call_tool("calculator", &args(json!({ "operation": "add", "a": 2, "b": 3 })))
            .unwrap();
        assert_eq!(result.first_text(), Some("Result: 5"));
    }

    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::builtin();
        let err = registry.call_tool("unknown", &Arguments::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Tool 'unknown' not found");
    }

    #[test]
    fn test_unknown_name_never_invokes_a_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registry = ToolRegistry::new();
        registry.register(
            ToolDefinition::new("counter", "counts", InputSchema::new()),
            move |_: &Arguments| -> Result<ToolResult, ToolError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(ToolResult::text("counted"))
            },
        );

        assert!(registry.call_tool("counterx", &Arguments::new()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        registry.call_tool("counter", &Arguments::new()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_error_becomes_failure_result() {
        let mut registry = ToolRegistry::new();
        registry.register(
            ToolDefinition::new("faulty", "always fails", InputSchema::new()),
            |_: &Arguments| -> Result<ToolResult, ToolError> {
                Err(ToolError::execution_failed("disk on fire"))
            },
        );

        let result = registry.call_tool("faulty", &Arguments::new()).unwrap();
        assert_eq!(result.error(), Some("Execution failed: disk on fire"));
    }

    #[test]
    fn test_handler_panic_becomes_failure_result() {
        let mut registry = ToolRegistry::new();
        registry.register(
            ToolDefinition::new("panicky", "panics", InputSchema::new()),
            |_: &Arguments| -> Result<ToolResult, ToolError> { panic!("unexpected state") },
        );

        let result = registry.call_tool("panicky", &Arguments::new()).unwrap();
        assert_eq!(result.error(), Some("unexpected state"));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ToolRegistry::builtin();
        registry.register(
            ToolDefinition::new("calculator", "replaced", InputSchema::new()),
            |_: &Arguments| -> Result<ToolResult, ToolError> { Ok(ToolResult::text("new")) },
        );

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.tool_names()[0], "calculator");
        assert_eq!(registry.list()[0].description, "replaced");

        let result = registry.call_tool("calculator", &Arguments::new()).unwrap();
        assert_eq!(result.first_text(), Some("new"));
    }
}
