use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::SberChatError;

use super::credentials::Credentials;
use super::error::AuthError;
use super::token::Token;

const OAUTH_PATH: &str = "oauth";

/// Request-tracing header the authorization endpoint expects on every call.
pub const REQUEST_ID_HEADER: &str = "RqUID";

/// Exchanges client credentials for a bearer [`Token`].
///
/// Stateless: it never looks at or writes a token store. The client decides
/// when a new token is needed.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: reqwest::Client,
    oauth_url: String,
}

impl Authenticator {
    pub fn new(client: reqwest::Client, auth_url: &str) -> Self {
        Self {
            client,
            oauth_url: format!("{}/{OAUTH_PATH}", auth_url.trim_end_matches('/')),
        }
    }

    pub fn oauth_url(&self) -> &str {
        &self.oauth_url
    }

    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<Token, SberChatError> {
        credentials.validate()?;

        let request_id = Uuid::new_v4();
        debug!(
            rq_uid = %request_id,
            scope = %credentials.scope(),
            "requesting access token"
        );

        let resp = self
            .client
            .post(&self.oauth_url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, credentials.basic_authorization())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .form(&[("scope", credentials.scope().as_str())])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(rq_uid = %request_id, status = status.as_u16(), "token request rejected");
            return Err(AuthError::rejected(status).into());
        }

        let body = resp.bytes().await?;
        let token: Token = serde_json::from_slice(&body)?;
        if token.access_token.is_empty() {
            return Err(AuthError::InvalidToken("empty access_token".to_string()).into());
        }
        debug!(rq_uid = %request_id, expires_at = %token.expires_at, "access token issued");
        Ok(token)
    }
}
