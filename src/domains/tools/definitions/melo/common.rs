//! Common utilities shared by the Melo tools.
//!
//! Result builders and text helpers used when logging upstream traffic.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

/// Maximum characters of a payload or error body kept in logs and messages.
pub const PREVIEW_LIMIT: usize = 500;

const REDACTED: &str = "[REDACTED]";

/// Truncate a string to at most `max` characters.
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Replace every occurrence of `secret` in `text`.
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, REDACTED)
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result carrying the payload verbatim.
///
/// The payload is attached as structured content and mirrored as pretty JSON
/// text for clients that only read text content.
pub fn payload_result(payload: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(payload),
        is_error: Some(false),
        meta: None,
    }
}
