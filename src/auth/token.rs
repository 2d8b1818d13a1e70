use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token issued by the authorization endpoint.
///
/// The wire form is the OAuth response body itself; `expires_at` travels as
/// Unix epoch milliseconds.
///
/// # Example
/// ```
/// use sberchat::auth::Token;
///
/// let token: Token = serde_json::from_str(
///     r#"{"access_token":"abc","expires_at":1706026848841}"#,
/// )?;
/// assert_eq!(token.access_token, "abc");
/// assert_eq!(token.expires_at.timestamp_millis(), 1706026848841);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Whether the token can still be sent at `now`, keeping `skew` in reserve.
    pub fn is_usable_at(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        let skew = TimeDelta::from_std(skew).unwrap_or(TimeDelta::MAX);
        match now.checked_add_signed(skew) {
            Some(limit) => self.expires_at > limit,
            None => false,
        }
    }

    pub fn is_usable(&self, skew: Duration) -> bool {
        self.is_usable_at(Utc::now(), skew)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
