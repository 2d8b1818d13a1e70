use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::error::AuthError;

/// Authorization audience a token is issued for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Scope {
    /// Individual API access.
    #[default]
    #[serde(rename = "GIGACHAT_API_PERS")]
    #[strum(serialize = "GIGACHAT_API_PERS")]
    Personal,
    /// Business API access, paid per request.
    #[serde(rename = "GIGACHAT_API_B2B")]
    #[strum(serialize = "GIGACHAT_API_B2B")]
    Business,
    /// Corporate API access.
    #[serde(rename = "GIGACHAT_API_CORP")]
    #[strum(serialize = "GIGACHAT_API_CORP")]
    Corporate,
}

impl Scope {
    /// Value sent in the `scope` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "GIGACHAT_API_PERS",
            Self::Business => "GIGACHAT_API_B2B",
            Self::Corporate => "GIGACHAT_API_CORP",
        }
    }
}

/// Client credentials exchanged for bearer tokens.
///
/// Immutable once built; `Debug` never prints the secret.
///
/// # Example
/// ```
/// use sberchat::auth::{Credentials, Scope};
///
/// let creds = Credentials::new("id", "hunter2").with_scope(Scope::Corporate);
/// assert_eq!(creds.scope().as_str(), "GIGACHAT_API_CORP");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    scope: Scope,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: Scope::default(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::MissingCredentials("client_id"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(AuthError::MissingCredentials("client_secret"));
        }
        Ok(())
    }

    /// `Authorization` header value for the token exchange.
    pub(crate) fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}
