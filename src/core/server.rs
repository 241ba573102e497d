//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` owns the tool registry, the resource registry and the session
//! store. It is constructed once at startup and handed to whichever transport
//! runs; cloning it is cheap and shares the same registries.
//!
//! The HTTP transport calls the inherent methods directly. The STDIO
//! transport goes through the rmcp `ServerHandler` implementation at the
//! bottom of this file, which adapts the same registries to the rmcp model.

use std::sync::Arc;
use std::time::Instant;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, Content as McpContent,
        ListResourcesResult, ListToolsResult, PaginatedRequestParam, RawResource,
        ReadResourceRequestParam, ReadResourceResult as McpReadResourceResult, Resource,
        ResourceContents as McpResourceContents, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::config::Config;
use super::session::SessionStore;
use crate::domains::resources::definitions::ServerInfoResource;
use crate::domains::resources::{
    ReadResourceResult, ResourceDefinition, ResourceError, ResourceRegistry,
};
use crate::domains::tools::{Arguments, ToolDefinition, ToolError, ToolRegistry, ToolResult};

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name and version of the server as reported to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

/// Response of the `initialize` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: Value,
    pub server_info: ServerIdentity,
    pub session_id: String,
}

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, read-only after construction.
    tools: Arc<ToolRegistry>,

    /// Registered resources, read-only after construction.
    resources: Arc<ResourceRegistry>,

    /// Sessions recorded by `initialize`.
    sessions: Arc<SessionStore>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    pub fn new(config: Config) -> Self {
        Self::with_tools(config, ToolRegistry::builtin())
    }

    /// Create a server around an already populated tool registry.
    ///
    /// The built-in resources are registered on top of it; the server info
    /// resource reports the names of exactly these tools.
    pub fn with_tools(config: Config, tools: ToolRegistry) -> Self {
        let started_at = Instant::now();
        let config = Arc::new(config);
        let tools = Arc::new(tools);

        let mut resources = ResourceRegistry::new();
        resources.register(
            ServerInfoResource::definition(),
            ServerInfoResource::new(config.server.clone(), tools.clone(), started_at),
        );

        info!(
            "Registry ready: {} tools, {} resources",
            tools.len(),
            resources.len()
        );

        Self {
            config,
            tools,
            resources: Arc::new(resources),
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Capability advertisement, taken verbatim from the registries.
    pub fn capabilities(&self) -> Value {
        let tools: Map<String, Value> = self
            .tools
            .list()
            .into_iter()
            .map(|t| (t.name.clone(), json!(t)))
            .collect();
        let resources: Map<String, Value> = self
            .resources
            .list()
            .into_iter()
            .map(|r| (r.uri.clone(), json!(r)))
            .collect();

        json!({
            "tools": tools,
            "resources": resources,
            "prompts": {},
            "experimental": {}
        })
    }

    /// Record a new session and describe the server to the client.
    pub async fn initialize(&self, client_info: Value) -> InitializeResult {
        let session = self.sessions.create(client_info).await;

        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities(),
            server_info: ServerIdentity {
                name: self.name().to_string(),
                version: self.version().to_string(),
            },
            session_id: session.id,
        }
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.list()
    }

    /// Call a tool by name.
    pub fn call_tool(&self, name: &str, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        self.tools.call_tool(name, arguments)
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.resources.list()
    }

    /// Read a resource by URI.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        self.resources.read_resource(uri)
    }
}

// ============================================================================
// rmcp model conversions
// ============================================================================

fn to_mcp_tool(definition: &ToolDefinition) -> Tool {
    Tool {
        name: definition.name.clone().into(),
        description: Some(definition.description.clone().into()),
        input_schema: Arc::new(definition.input_schema.to_json_object()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

fn to_mcp_resource(definition: &ResourceDefinition) -> Resource {
    let mut raw = RawResource::new(definition.uri.clone(), definition.name.clone());
    raw.description = Some(definition.description.clone());
    raw.mime_type = Some(definition.mime_type.clone());
    raw.no_annotation()
}

fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    match result {
        ToolResult::Success(content) => CallToolResult::success(
            content
                .iter()
                .map(|c| McpContent::text(c.as_text()))
                .collect(),
        ),
        ToolResult::Failure(message) => CallToolResult::error(vec![McpContent::text(message)]),
    }
}

fn to_mcp_read_result(result: ReadResourceResult) -> McpReadResourceResult {
    McpReadResourceResult {
        contents: result
            .contents
            .into_iter()
            .map(|c| McpResourceContents::TextResourceContents {
                uri: c.uri,
                mime_type: Some(c.mime_type),
                text: c.text,
                meta: None,
            })
            .collect(),
    }
}

/// ServerHandler implementation used by the STDIO transport.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tools: calculator, get_current_time, weather_info. \
                 Resource: mcp://server/info."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools.list().iter().map(to_mcp_tool).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        self.tools
            .call_tool(&request.name, &arguments)
            .map(to_call_tool_result)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resources.list().iter().map(to_mcp_resource).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<McpReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resources
            .read_resource(&request.uri)
            .map(to_mcp_read_result)
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                other => McpError::internal_error(other.to_string(), None),
            })
    }
}
