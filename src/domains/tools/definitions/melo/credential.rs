//! Per-invocation API key handling.
//!
//! The key travels from the transport headers to the upstream request as an
//! explicit argument. It is never stored in configuration or shared state.

use http::HeaderMap;

/// Header carrying the caller's Melo API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Caller-supplied Melo API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key. Blank values are treated as absent.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Read the key from request headers (header names are case-insensitive).
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Self::new)
    }

    /// The raw key, for building the upstream request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Custom Debug implementation to redact the key from logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}
