//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`. Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for the JSON-RPC transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs` and
//! serves the `ServerHandler` over Streamable HTTP.
//!
//! The server holds no per-caller state. The Melo API key is extracted from
//! each request and passed down explicitly.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::build_tool_router;
use crate::domains::tools::definitions::{MeloClient, PropertySource};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry, definitions::melo::ApiKey};

const INSTRUCTIONS: &str = "Real estate search server backed by the Melo API. \
     Use the search_properties tool to find apartments and houses for sale or rent in France. \
     Every call must carry an X-API-KEY header with your own Melo API key.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the transports and the tools domain.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Upstream listing source shared by all invocations.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    source: Arc<dyn PropertySource>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured Melo endpoint.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let source: Arc<dyn PropertySource> = Arc::new(MeloClient::new(&config.melo)?);
        Ok(Self::with_source(config, source))
    }

    /// Create a server with an explicit property source.
    pub fn with_source(config: Config, source: Arc<dyn PropertySource>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(source.clone()),
            config: Arc::new(config),
            source,
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

    /// Instructions advertised to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `credential` comes from the current request's headers only.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        credential: Option<ApiKey>,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.source.clone());
        registry.call_tool(name, arguments, credential).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
