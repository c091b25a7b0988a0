//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// MCP Streamable HTTP served by rmcp, stateless.
    #[cfg(feature = "streamable-http")]
    Streamable(HttpConfig),

    /// HTTP transport with plain JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP listener configuration, shared by both HTTP transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the MCP endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Read `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH` and `MCP_HTTP_CORS`.
    pub fn from_env() -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            rpc_path,
            enable_cors,
        }
    }

    /// Bind address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for TransportConfig {
    // Streamable HTTP is the protocol MCP clients speak and the one that
    // hands request headers to the rmcp tool route.
    fn default() -> Self {
        #[cfg(feature = "streamable-http")]
        {
            return Self::Streamable(HttpConfig::default());
        }

        #[cfg(all(not(feature = "streamable-http"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "streamable-http", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: streamable-http or http");
        }
    }
}

impl TransportConfig {
    /// Create a Streamable HTTP transport config.
    #[cfg(feature = "streamable-http")]
    pub fn streamable(port: u16, host: impl Into<String>) -> Self {
        Self::Streamable(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Create a JSON-RPC HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT=http` selects plain JSON-RPC; anything else selects
    /// Streamable HTTP when that feature is compiled in.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        Self::select(&transport, HttpConfig::from_env())
    }

    fn select(transport: &str, http: HttpConfig) -> Self {
        match transport {
            #[cfg(feature = "http")]
            "http" | "jsonrpc" => Self::Http(http),
            #[cfg(feature = "streamable-http")]
            _ => Self::Streamable(http),
            #[cfg(not(feature = "streamable-http"))]
            _ => Self::Http(http),
        }
    }

    /// Listener settings of the selected transport.
    pub fn http_config(&self) -> &HttpConfig {
        match self {
            #[cfg(feature = "streamable-http")]
            Self::Streamable(cfg) => cfg,
            #[cfg(feature = "http")]
            Self::Http(cfg) => cfg,
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "streamable-http")]
            Self::Streamable(cfg) => format!(
                "Streamable HTTP on {}{} (stateless)",
                cfg.address(),
                cfg.rpc_path
            ),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("JSON-RPC HTTP on {}{}", cfg.address(), cfg.rpc_path),
        }
    }
}
