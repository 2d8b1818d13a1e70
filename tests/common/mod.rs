//! Shared test helpers: mock authorization server and canned bodies.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sberchat::config::ClientConfig;
use sberchat::{Client, Credentials, Token};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// base64("client-id:client-secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const API_PREFIX: &str = "/api/v1";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .auth_url(server.uri())
        .base_url(format!("{}{API_PREFIX}", server.uri()))
        .build()
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(Credentials::new(CLIENT_ID, CLIENT_SECRET), config_for(server))
        .expect("client builds")
}

pub fn token_body(access_token: &str, valid_for: Duration) -> Value {
    json!({
        "access_token": access_token,
        "expires_at": (Utc::now() + valid_for).timestamp_millis(),
    })
}

pub fn fresh_token(access_token: &str) -> Token {
    Token::new(access_token, Utc::now() + Duration::minutes(30))
}

/// Mount a token endpoint answering with a 30-minute token.
pub async fn mount_oauth(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(ACCESS_TOKEN, Duration::minutes(30))),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn chat_response_body() -> Value {
    json!({
        "model": "GigaChat:latest",
        "created": 1706026848,
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": "Hello! How can I help?"}
            }
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
    })
}

pub fn model_body(id: &str) -> Value {
    json!({"id": id, "object": "model", "owned_by": "salutedevices"})
}
