//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **HTTP**: one POST route per MCP operation (default) - feature: `http`
//! - **STDIO**: standard MCP JSON-RPC over stdin/stdout - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the shared `McpServer`.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "http")]
pub use config::HttpConfig;

#[cfg(feature = "http")]
pub use http::{ApiError, build_router};
