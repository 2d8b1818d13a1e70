//! Integration tests for authenticated dispatch: model lookup, chat
//! completions, error classification, and cancellation.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sberchat::error::ErrorCategory;
use sberchat::types::{ChatRequest, Message, Role};
use sberchat::{RequestContext, SberChatError};

use common::*;

fn hello_request() -> ChatRequest {
    ChatRequest::builder()
        .model("GigaChat:latest")
        .messages(vec![Message::user("hi")])
        .max_tokens(10)
        .build()
}

async fn mount_chat(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(format!("{API_PREFIX}/chat/completions")))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn chat_sends_bearer_json_and_decodes_response() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PREFIX}/chat/completions")))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "model": "GigaChat:latest",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.chat(&hello_request()).await.expect("chat");

    assert_eq!(response.model, "GigaChat:latest");
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0].finish_reason, "stop");
    assert_eq!(response.choices[0].message.role, Role::Assistant);
    assert_eq!(response.first_content(), Some("Hello! How can I help?"));
    assert_eq!(response.usage.total_tokens, 19);
}

#[tokio::test]
async fn optional_parameters_are_sent_when_set() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PREFIX}/chat/completions")))
        .and(body_json(json!({
            "model": "GigaChat",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ],
            "temperature": 0.5,
            "n": 2,
            "stream": false,
            "max_tokens": 64,
            "repetition_penalty": 1.1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::builder()
        .model("GigaChat")
        .messages(vec![Message::system("be brief"), Message::user("hi")])
        .temperature(0.5)
        .n(2)
        .stream(false)
        .max_tokens(64)
        .repetition_penalty(1.1)
        .build();

    let client = client_for(&server);
    client.chat(&request).await.expect("chat");
}

#[tokio::test]
async fn one_authentication_serves_many_calls() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_response_body()),
        3,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models/GigaChat")))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_body("GigaChat")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();
    for _ in 0..3 {
        client.chat(&hello_request()).await.unwrap();
    }
    for _ in 0..2 {
        client.model("GigaChat").await.unwrap();
    }
}

#[tokio::test]
async fn operations_authenticate_implicitly() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models/GigaChat-Pro")))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_body("GigaChat-Pro")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let model = client.model("GigaChat-Pro").await.expect("model");

    assert_eq!(model.id, "GigaChat-Pro");
    assert_eq!(model.owned_by, "salutedevices");
    assert!(client.token().await.is_some());
}

#[tokio::test]
async fn model_id_is_encoded_as_single_path_segment() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models/vendor%2Fmodel%3Fx%23y")))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_body("vendor/model?x#y")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let model = client.model("vendor/model?x#y").await.expect("model");

    assert_eq!(model.id, "vendor/model?x#y");
}

#[tokio::test]
async fn models_lists_available_models() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [model_body("GigaChat"), model_body("GigaChat-Pro")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let list = client.models().await.expect("models");

    assert_eq!(list.ids().collect::<Vec<_>>(), vec!["GigaChat", "GigaChat-Pro"]);
    assert!(list.find("GigaChat-Pro").is_some());
}

#[tokio::test]
async fn bad_request_becomes_api_error_with_payload() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({"error": "bad request"})),
        1,
    )
    .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();
    let before = client.token().await;

    let err = client.chat(&hello_request()).await.unwrap_err();
    match &err {
        SberChatError::Api {
            status,
            status_text,
            url,
            payload,
        } => {
            assert_eq!(*status, 400);
            assert_eq!(status_text, "Bad Request");
            assert!(url.ends_with("/api/v1/chat/completions"));
            assert_eq!(payload, &json!({"error": "bad request"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::Api);
    assert_eq!(client.token().await, before);
}

#[tokio::test]
async fn empty_error_body_decodes_to_null_payload() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(&server, ResponseTemplate::new(503), 1).await;

    let client = client_for(&server);
    let err = client.chat(&hello_request()).await.unwrap_err();

    assert!(matches!(
        err,
        SberChatError::Api {
            status: 503,
            payload: serde_json::Value::Null,
            ..
        }
    ));
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[tokio::test]
async fn non_json_error_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(
        &server,
        ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"),
        1,
    )
    .await;

    let client = client_for(&server);
    let err = client.chat(&hello_request()).await.unwrap_err();
    assert!(matches!(err, SberChatError::Decode(_)));
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_string("{\"model\": \"GigaChat\""),
        1,
    )
    .await;

    let client = client_for(&server);
    let err = client.chat(&hello_request()).await.unwrap_err();
    assert!(matches!(err, SberChatError::Decode(_)));
}

#[tokio::test]
async fn cancelled_context_makes_no_request() {
    let server = MockServer::start().await;
    mount_oauth(&server, 0).await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_response_body()),
        0,
    )
    .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    ctx.cancel();

    let err = client
        .chat_with_context(&ctx, &hello_request())
        .await
        .unwrap_err();
    assert!(matches!(err, SberChatError::Cancelled));
    assert!(client.token().await.is_none());
}

#[tokio::test]
async fn deadline_during_chat_returns_deadline_exceeded() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    mount_chat(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(chat_response_body())
            .set_delay(Duration::from_secs(3)),
        1,
    )
    .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let ctx = RequestContext::background().with_timeout(Duration::from_millis(200));
    let err = client
        .chat_with_context(&ctx, &hello_request())
        .await
        .unwrap_err();
    assert!(err.is_cancellation());
    assert!(matches!(err, SberChatError::DeadlineExceeded));
}

#[tokio::test]
async fn deadline_during_authentication_leaves_store_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body(ACCESS_TOKEN, chrono::Duration::minutes(30)))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background().with_timeout(Duration::from_millis(200));

    let err = client
        .authenticate_with_context(&ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, SberChatError::DeadlineExceeded));
    assert!(client.token().await.is_none());
}

#[tokio::test]
async fn concurrent_first_calls_share_one_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body(ACCESS_TOKEN, chrono::Duration::minutes(30)))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(chat_response_body()),
        2,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models/GigaChat")))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_body("GigaChat")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = hello_request();
    let (a, b, c) = tokio::join!(
        client.chat(&request),
        client.chat(&request),
        client.model("GigaChat"),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();
}

#[tokio::test]
async fn unauthorized_api_response_is_classified_as_authentication() {
    let server = MockServer::start().await;
    mount_oauth(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/models/GigaChat")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"status": 401})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.model("GigaChat").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.category(), ErrorCategory::Authentication);
}
