//! Resources domain module.
//!
//! This module handles all resource-related functionality for the MCP server.
//! Resources represent read-only data addressed by URI.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `handlers.rs` - Resource metadata, read envelope and the `ResourceHandler` trait
//! - `registry.rs` - Central resource registration and read dispatch
//! - `error.rs` - Resource-specific error types

pub mod definitions;
mod error;
pub mod handlers;
mod registry;

pub use error::ResourceError;
pub use handlers::{ReadResourceResult, ResourceContents, ResourceDefinition, ResourceHandler};
pub use registry::{ResourceEntry, ResourceRegistry};
