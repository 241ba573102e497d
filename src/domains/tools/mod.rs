//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Declarative tool metadata (name, description, input schema)
//! - `handlers.rs` - The `ToolHandler` trait, the result envelope and argument helpers
//! - `registry.rs` - Central tool registry and dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Provide a `definition()` and implement `ToolHandler`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `ToolRegistry::builtin()`

pub mod definitions;
mod error;
pub mod handlers;
mod registry;
pub mod schema;

pub use error::ToolError;
pub use handlers::{Arguments, Content, ToolHandler, ToolResult};
pub use registry::{ToolEntry, ToolRegistry};
pub(crate) use registry::panic_message;
pub use schema::{InputSchema, ParamSchema, ParamType, ToolDefinition};
