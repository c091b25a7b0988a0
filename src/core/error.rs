//! Error types and handling for the MCP server.
//!
//! Failures while assembling the server. Transport failures keep their own
//! `TransportError`, and search failures are reported inside tool results.

use thiserror::Error;

use crate::domains::tools::definitions::melo::SearchError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream search client could not be built.
    #[error("Search client error: {0}")]
    Search(#[from] SearchError),
}
