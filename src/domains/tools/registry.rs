//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
#[cfg(feature = "http")]
use super::definitions::melo::ApiKey;
use super::definitions::{PropertySource, SearchPropertiesTool};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds the shared property source. Credentials are never stored here; they
/// arrive with each call.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    source: Arc<dyn PropertySource>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self { source }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![SearchPropertiesTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![SearchPropertiesTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        credential: Option<ApiKey>,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            SearchPropertiesTool::NAME => {
                SearchPropertiesTool::http_handler(arguments, credential, self.source.clone())
                    .await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
