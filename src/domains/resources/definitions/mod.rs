//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and a
//! `ResourceHandler` implementation. Register new resources in
//! `ResourceRegistry` construction inside `core/server.rs`.

pub mod server_info;

pub use server_info::{ServerInfo, ServerInfoResource};
