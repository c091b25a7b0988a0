//! Transport layer for the MCP server.
//!
//! This module provides two HTTP transports:
//! - **Streamable HTTP**: the MCP Streamable HTTP protocol served by rmcp in
//!   stateless mode - feature: `streamable-http`
//! - **HTTP**: plain JSON-RPC over POST requests - feature: `http`
//!
//! Both read the caller's `x-api-key` header on every request and hand it to
//! the search tool. Nothing is kept between requests.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "streamable-http")]
pub mod streamable;

pub use config::{HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
