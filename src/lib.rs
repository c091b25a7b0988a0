//! Melo MCP Server Library
//!
//! A Model Context Protocol server exposing a single `search_properties`
//! tool backed by the Melo real-estate API (`https://api.notif.immo`).
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the Melo search tool, its query translation and HTTP client
//!
//! Callers authenticate with their own Melo API key, sent as an
//! `X-API-KEY` header on every request. The server never stores it.
//!
//! # Example
//!
//! ```rust,no_run
//! use melo_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::definitions::melo::{ApiKey, SearchCriteria, SearchError};
