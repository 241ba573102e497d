//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport with JSON-RPC messages.
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with one route per MCP operation.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Prefix of the MCP operation routes (`{prefix}/tools/call`, ...).
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Restrict CORS to a single origin. Any origin is allowed when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    5000
}

#[cfg(feature = "http")]
fn default_route_prefix() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            route_prefix: default_route_prefix(),
            enable_cors: default_cors(),
            cors_origin: None,
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            _ => {
                let port = std::env::var("MCP_HTTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_port);
                let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
                let route_prefix =
                    std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_route_prefix());
                let enable_cors = std::env::var("MCP_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true);
                let cors_origin = std::env::var("MCP_HTTP_CORS_ORIGIN")
                    .ok()
                    .filter(|o| !o.is_empty() && o != "*");
                Self::Http(HttpConfig {
                    port,
                    host,
                    route_prefix,
                    enable_cors,
                    cors_origin,
                })
            }
            #[cfg(all(not(feature = "http"), feature = "stdio"))]
            _ => Self::Stdio,
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (JSON-RPC on stdin/stdout)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.route_prefix),
        }
    }

    /// Check if this transport is the STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use crate::core::config::tests::ENV_TEST_LOCK;

    fn clear_env() {
        unsafe {
            for key in [
                "MCP_TRANSPORT",
                "MCP_HTTP_PORT",
                "MCP_HTTP_HOST",
                "MCP_HTTP_PATH",
                "MCP_HTTP_CORS",
                "MCP_HTTP_CORS_ORIGIN",
            ] {
                std::env::remove_var(key);
            }
        }
    }

    fn http(config: TransportConfig) -> HttpConfig {
        match config {
            TransportConfig::Http(cfg) => cfg,
            #[allow(unreachable_patterns)]
            other => panic!("Expected HTTP transport, got {:?}", other),
        }
    }

    #[test]
    fn test_http_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        let cfg = http(TransportConfig::from_env());
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.route_prefix, "/mcp");
        assert!(cfg.enable_cors);
        assert!(cfg.cors_origin.is_none());
    }

    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "http");
            std::env::set_var("MCP_HTTP_PORT", "9090");
            std::env::set_var("MCP_HTTP_HOST", "127.0.0.1");
            std::env::set_var("MCP_HTTP_CORS_ORIGIN", "https://app.example.com");
        }
        let cfg = http(TransportConfig::from_env());
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.cors_origin.as_deref(), Some("https://app.example.com"));
        clear_env();
    }

    #[test]
    fn test_wildcard_origin_means_any() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_HTTP_CORS_ORIGIN", "*");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }
        let cfg = http(TransportConfig::from_env());
        assert!(cfg.cors_origin.is_none());
        assert!(!cfg.enable_cors);
        clear_env();
    }

    #[test]
    fn test_bad_port_falls_back_to_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "not-a-port");
        }
        assert_eq!(http(TransportConfig::from_env()).port, 5000);
        clear_env();
    }

    #[test]
    fn test_description() {
        let config = TransportConfig::http(8080, "localhost");
        assert_eq!(config.description(), "HTTP on localhost:8080/mcp");
        assert!(!config.is_stdio());
    }
}
