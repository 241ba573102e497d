//! HTTP transport implementation.
//!
//! One POST route per MCP operation plus a `GET /health` probe. Bodies are
//! JSON; every failure is answered with `{"error": "..."}` and a status code:
//! 404 when the named tool or resource does not exist, 500 for anything else
//! that goes wrong while processing the request. Handler-level tool errors
//! are part of the tool result and are returned with 200.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use http::{HeaderValue, Method, StatusCode, header};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::{TransportConfig, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::InitializeResult;
use crate::domains::resources::{ReadResourceResult, ResourceError};
use crate::domains::tools::{Arguments, ToolError, ToolResult};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
}

// ============================================================================
// Errors
// ============================================================================

/// Failure of a route, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The named tool or resource is not registered.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request or unexpected fault.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::NotFound(msg) => warn!("{}", msg),
            Self::Internal(msg) => error!("Request failed: {}", msg),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ============================================================================
// Transport
// ============================================================================

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Create from TransportConfig (extracts HTTP config).
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Http(http_config) => Some(Self::new(http_config.clone())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = match (self.config.enable_cors, self.config.cors_origin.as_deref()) {
            (false, _) => "disabled".to_string(),
            (true, None) => "any origin".to_string(),
            (true, Some(origin)) => format!("origin {}", origin),
        };
        let prefix = &self.config.route_prefix;
        info!("Ready - listening on {} (CORS: {})", addr, cors_status);
        info!("  → Initialize:     POST {}/initialize", prefix);
        info!("  → Tools:          POST {}/tools/list, {}/tools/call", prefix, prefix);
        info!(
            "  → Resources:      POST {}/resources/list, {}/resources/read",
            prefix, prefix
        );
        info!("  → Ping:           POST {}/ping", prefix);
        info!("  → Health:         GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router with every MCP route, tracing and CORS layers.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let prefix = config.route_prefix.trim_end_matches('/');

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route(&format!("{prefix}/initialize"), post(initialize))
        .route(&format!("{prefix}/tools/list"), post(list_tools))
        .route(&format!("{prefix}/tools/call"), post(call_tool))
        .route(&format!("{prefix}/resources/list"), post(list_resources))
        .route(&format!("{prefix}/resources/read"), post(read_resource))
        .route(&format!("{prefix}/ping"), post(ping))
        .with_state(AppState { server })
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        app = app.layer(cors_layer(config.cors_origin.as_deref()));
    }

    app
}

/// CORS policy: any origin unless a single origin is configured.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        None => AllowOrigin::any(),
        Some(Ok(value)) => AllowOrigin::list([value]),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS origin ({}), allowing any origin", e);
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// ============================================================================
// Request parsing
// ============================================================================

/// Parse a request body as a JSON object, whatever its content type.
fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::internal(format!(
            "Request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn required_str<'a>(request: &'a Map<String, Value>, key: &str) -> Result<&'a str, ApiError> {
    request
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::internal(format!("Missing required field '{key}'")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Route handlers
// ============================================================================

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Keepalive endpoint.
async fn ping() -> impl IntoResponse {
    Json(json!({
        "pong": true,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn initialize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InitializeResult>, ApiError> {
    let mut request = parse_object(&body)?;
    let client_info = request.remove("clientInfo").unwrap_or_else(|| json!({}));

    let result = state.server.initialize(client_info).await;
    info!("Initialized session {}", result.session_id);

    Ok(Json(result))
}

#[instrument(skip_all)]
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "tools": state.server.list_tools() }))
}

#[instrument(skip_all, fields(tool))]
async fn call_tool(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ToolResult>, ApiError> {
    let request = parse_object(&body)?;
    let name = required_str(&request, "name")?;
    tracing::Span::current().record("tool", name);

    let arguments = match request.get("arguments") {
        None | Some(Value::Null) => Arguments::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(ApiError::internal(format!(
                "Field 'arguments' must be a JSON object, got {}",
                json_kind(other)
            )));
        }
    };

    info!("Calling tool: {}", name);
    let result = state.server.call_tool(name, &arguments)?;
    Ok(Json(result))
}

#[instrument(skip_all)]
async fn list_resources(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "resources": state.server.list_resources() }))
}

#[instrument(skip_all, fields(uri))]
async fn read_resource(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReadResourceResult>, ApiError> {
    let request = parse_object(&body)?;
    let uri = required_str(&request, "uri")?;
    tracing::Span::current().record("uri", uri);

    info!("Reading resource: {}", uri);
    let result = state.server.read_resource(uri)?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_rejects_non_objects() {
        assert!(parse_object(b"{\"a\":1}").is_ok());
        assert!(matches!(parse_object(b"[1,2]"), Err(ApiError::Internal(_))));
        assert!(matches!(parse_object(b"not json"), Err(ApiError::Internal(_))));
        assert!(matches!(parse_object(b""), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_api_error_status() {
        let not_found: ApiError = ToolError::not_found("x").into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "Tool 'x' not found");

        let internal: ApiError = ResourceError::internal("boom").into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_required_str() {
        let request = parse_object(b"{\"name\":\"calculator\",\"n\":1}").unwrap();
        assert_eq!(required_str(&request, "name").unwrap(), "calculator");
        assert!(required_str(&request, "n").is_err());
        assert!(required_str(&request, "missing").is_err());
    }

    #[test]
    fn test_address() {
        let transport = HttpTransport::new(HttpConfig {
            port: 5001,
            host: "127.0.0.1".to_string(),
            ..Default::default()
        });
        assert_eq!(transport.address(), "127.0.0.1:5001");
    }
}
