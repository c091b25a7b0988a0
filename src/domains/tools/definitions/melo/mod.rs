//! Melo real-estate tools module.
//!
//! - `criteria`: caller-facing search parameters and their label mappings
//! - `query`: translation of criteria into the upstream query string
//! - `client`: the HTTP client and the `PropertySource` seam
//! - `credential`: per-invocation API key extraction
//! - `search`: the `search_properties` MCP tool

pub mod client;
pub mod common;
pub mod credential;
pub mod criteria;
pub mod error;
pub mod query;
pub mod search;

pub use client::{MeloClient, PropertySource};
pub use credential::{API_KEY_HEADER, ApiKey};
pub use criteria::{OrderBy, PropertyType, SearchCriteria, SortDirection, TransactionType};
pub use error::{ErrorKind, SearchError};
pub use query::{UpstreamQuery, translate};
pub use search::SearchPropertiesTool;
