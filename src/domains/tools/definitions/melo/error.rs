//! Failure taxonomy for property searches.

use thiserror::Error;

/// Coarse classification of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No API key on the invocation.
    MissingCredential,
    /// Arguments outside the accepted domain.
    InvalidParams,
    /// The upstream rejected the API key.
    InvalidCredential,
    /// Any other upstream or transport failure.
    Upstream,
}

/// Errors that can occur while searching for properties.
///
/// Messages are caller-facing and never contain the API key.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing X-API-KEY header. Please provide your Melo API key.")]
    MissingCredential,

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid Melo API key. Please check your credentials.")]
    InvalidCredential,

    #[error("Melo API returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Melo API request failed: {0}")]
    Transport(String),

    #[error("Invalid Melo API response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::InvalidParams(_) => ErrorKind::InvalidParams,
            Self::InvalidCredential => ErrorKind::InvalidCredential,
            Self::UpstreamStatus { .. } | Self::Transport(_) | Self::InvalidResponse(_) => {
                ErrorKind::Upstream
            }
        }
    }
}
