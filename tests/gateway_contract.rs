//! Wire contract of the HTTP gateway against a mock endpoint.

use httpmock::prelude::*;
use serde_json::json;

use scribe_engine::{AgentConfig, GatewayError, HttpGateway, ModelGateway};

fn config_for(endpoint: String) -> AgentConfig {
    AgentConfig {
        model: "test-model".into(),
        endpoint,
        ..AgentConfig::default()
    }
}

#[tokio::test]
async fn posts_model_prompt_and_stream_false_and_reads_the_response_field() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .json_body_partial(r#"{"model": "test-model", "stream": false}"#);
            then.status(200).json_body(json!({"response": "mock-ok"}));
        })
        .await;

    let gateway = HttpGateway::from_config(&config_for(server.url("/api/generate"))).unwrap();
    let reply = gateway.complete("system: hi\nuser: hello").await.unwrap();

    assert_eq!(reply, "mock-ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn passes_the_prompt_through_verbatim() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .json_body_partial(r#"{"prompt": "system: s\nuser: héllo"}"#);
            then.status(200).json_body(json!({"response": "ok"}));
        })
        .await;

    let gateway = HttpGateway::from_config(&config_for(server.url("/api/generate"))).unwrap();
    gateway.complete("system: s\nuser: héllo").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn a_body_without_a_response_field_is_returned_verbatim() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body("plain completion text");
        })
        .await;

    let gateway = HttpGateway::from_config(&config_for(server.url("/api/generate"))).unwrap();
    let reply = gateway.complete("user: hi").await.unwrap();

    assert_eq!(reply, "plain completion text");
}

#[tokio::test]
async fn a_failure_status_is_reported_with_its_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(500).body("model exploded");
        })
        .await;

    let gateway = HttpGateway::from_config(&config_for(server.url("/api/generate"))).unwrap();
    let err = gateway.complete("user: hi").await.unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn an_unreachable_endpoint_is_a_connect_error() {
    // Nothing listens on the discard port.
    let gateway =
        HttpGateway::from_config(&config_for("http://127.0.0.1:9/api/generate".into())).unwrap();

    let err = gateway.complete("user: hi").await.unwrap_err();

    assert!(matches!(err, GatewayError::Connect(_)));
}
