//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the session store, server
//! lifecycle management, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::{InitializeResult, McpServer, PROTOCOL_VERSION};
pub use session::{Session, SessionStore};
pub use transport::{TransportConfig, TransportService};
