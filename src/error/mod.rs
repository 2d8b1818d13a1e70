//! Error types for sberchat.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

use crate::auth::AuthError;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum SberChatError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("API request failed: status {status} {status_text} {url}: {payload}")]
    Api {
        status: u16,
        status_text: String,
        url: String,
        payload: serde_json::Value,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SberChatError {
    /// Build an API error from a non-200 response.
    pub fn api(
        status: reqwest::StatusCode,
        url: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: url.into(),
            payload,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(err) if err.is_timeout() => ErrorCategory::Timeout,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::DeadlineExceeded => ErrorCategory::Timeout,
            Self::Configuration(_) | Self::Io(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the caller cancelled the operation or its deadline passed.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SberChatError>;
