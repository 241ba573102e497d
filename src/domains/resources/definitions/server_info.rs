//! Server info resource definition.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::core::config::ServerConfig;
use crate::domains::resources::handlers::{
    ReadResourceResult, ResourceDefinition, ResourceHandler,
};
use crate::domains::resources::ResourceError;
use crate::domains::tools::{Arguments, ToolRegistry};

/// Document returned by the server info resource.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Names of the registered tools.
    pub capabilities: Vec<String>,
    /// Seconds since the server was constructed.
    pub uptime: f64,
    pub timestamp: String,
}

/// Server information resource (dynamic).
pub struct ServerInfoResource {
    server: ServerConfig,
    tools: Arc<ToolRegistry>,
    started_at: Instant,
}

impl ServerInfoResource {
    pub const URI: &'static str = "mcp://server/info";
    pub const NAME: &'static str = "Server Information";
    pub const DESCRIPTION: &'static str = "Information about this MCP server";
    pub const MIME_TYPE: &'static str = "application/json";

    pub fn new(server: ServerConfig, tools: Arc<ToolRegistry>, started_at: Instant) -> Self {
        Self {
            server,
            tools,
            started_at,
        }
    }

    pub fn definition() -> ResourceDefinition {
        ResourceDefinition::new(Self::URI, Self::NAME, Self::DESCRIPTION, Self::MIME_TYPE)
    }

    /// Snapshot of the server state at call time.
    pub fn snapshot(&self) -> ServerInfo {
        ServerInfo {
            name: self.server.name.clone(),
            version: self.server.version.clone(),
            description: self.server.description.clone(),
            capabilities: self.tools.tool_names(),
            uptime: self.started_at.elapsed().as_secs_f64(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ResourceHandler for ServerInfoResource {
    fn read(&self, uri: &str, _arguments: &Arguments) -> Result<ReadResourceResult, ResourceError> {
        let text = serde_json::to_string_pretty(&self.snapshot())?;
        Ok(ReadResourceResult::text(uri, Self::MIME_TYPE, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn resource() -> ServerInfoResource {
        ServerInfoResource::new(
            Config::default().server,
            Arc::new(ToolRegistry::builtin()),
            Instant::now(),
        )
    }

    #[test]
    fn test_server_info_metadata() {
        let definition = ServerInfoResource::definition();
        assert_eq!(definition.uri, "mcp://server/info");
        assert_eq!(definition.mime_type, "application/json");
    }

    #[test]
    fn test_server_info_read() {
        let result = resource()
            .read(ServerInfoResource::URI, &Arguments::new())
            .unwrap();
        assert_eq!(result.contents.len(), 1);

        let item = &result.contents[0];
        assert_eq!(item.uri, "mcp://server/info");
        assert_eq!(item.mime_type, "application/json");

        let info: serde_json::Value = serde_json::from_str(&item.text).unwrap();
        assert_eq!(
            info["capabilities"],
            serde_json::json!(["calculator", "get_current_time", "weather_info"])
        );
        assert!(info["uptime"].as_f64().unwrap() >= 0.0);
        assert!(info["timestamp"].is_string());
        assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_text_is_pretty_printed() {
        let result = resource()
            .read(ServerInfoResource::URI, &Arguments::new())
            .unwrap();
        assert!(result.contents[0].text.contains("\n  \"name\""));
    }
}
