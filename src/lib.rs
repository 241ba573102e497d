//! MCP HTTP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server whose operations
//! are exposed as plain HTTP routes: initialize a session, list and call
//! tools, list and read resources.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the session store, the
//!   `McpServer` that owns the registries, and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registry, dispatch and the built-in tools
//!   - **resources**: resource registry and the server info resource
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_http_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
