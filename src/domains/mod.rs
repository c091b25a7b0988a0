//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently exposes a single domain: MCP tools backed by the
//! Melo real-estate API.

pub mod tools;
