use thiserror::Error;

/// Failures specific to the token exchange.
///
/// Transport and decode failures during authentication surface as the
/// corresponding [`crate::error::SberChatError`] variants instead.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing credentials: {0} is empty")]
    MissingCredentials(&'static str),
    #[error("Authorization rejected: status {status} {status_text}")]
    Rejected { status: u16, status_text: String },
    #[error("Invalid access token: {0}")]
    InvalidToken(String),
}

impl AuthError {
    pub(crate) fn rejected(status: reqwest::StatusCode) -> Self {
        Self::Rejected {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}
