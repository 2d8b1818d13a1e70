//! HTTP transport construction and header helpers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::auth::AuthError;
use crate::config::ClientConfig;
use crate::error::SberChatError;

/// Build the reqwest client described by `config`.
///
/// With `insecure` set, certificate verification is disabled entirely. The
/// upstream service presents certificates from a CA that is absent from the
/// usual trust stores.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SberChatError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .pool_max_idle_per_host(10)
        .danger_accept_invalid_certs(config.insecure)
        .build()?;
    Ok(client)
}

/// Headers for a bearer-authenticated JSON call.
pub fn bearer_headers(access_token: &str) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|_| AuthError::InvalidToken("not a valid header value".to_string()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}
