//! Tests for HTTP handlers
//!
//! Requests go through the full router so extraction, status mapping and
//! JSON rendering are exercised together.

use super::*;
use crate::{
    metrics::{PrometheusWebhookMetrics, WebhookMetrics},
    routes::create_router,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use receiver_core::{sign_payload, AlgorithmId, ReceiverConfig, SecretSet};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "shared-secret";
const USERNAME: &str = "bot-1";

fn test_app(config: ReceiverConfig) -> (Router, Arc<PrometheusWebhookMetrics>) {
    let metrics = Arc::new(PrometheusWebhookMetrics::new().unwrap());
    let state = AppState::new(config, metrics.clone());
    (create_router(state), metrics)
}

fn default_config() -> ReceiverConfig {
    ReceiverConfig::new(SecretSet::new([SECRET]).unwrap())
}

fn signed_request(body: &str, event: &str) -> axum::http::request::Builder {
    let digest = sign_payload(body.as_bytes(), SECRET, USERNAME, AlgorithmId::Sha256);
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("X-WAREST-Signature", format!("HMAC-SHA256={}", digest))
        .header("X-WAREST-Signature-Alg", "HMAC-SHA256")
        .header("X-WAREST-Username", USERNAME)
        .header("X-WAREST-Event", event)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn message_body(text: &str) -> String {
    json!({
        "event": "message_received",
        "data": {
            "text": text,
            "contentType": "text",
            "sender": { "chatId": "628123@s.whatsapp.net" },
            "message": { "key": { "id": "ABC123", "fromMe": false } }
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_signed_test_message_gets_pong_reply() {
    let (app, metrics) = test_app(default_config());
    let body = message_body("test");
    let request = signed_request(&body, "message_received")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "ok": true,
            "actions": [{ "type": "text", "to": "628123@s.whatsapp.net", "text": "pong" }],
            "delayMs": 600
        })
    );
    assert_eq!(metrics.count(WebhookOutcome::Accepted), 1);
}

#[tokio::test]
async fn test_react_carries_message_key() {
    let (app, _) = test_app(default_config());
    let body = message_body("  REACT ");
    let request = signed_request(&body, "message_received")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let action = &json["actions"][0];
    assert_eq!(action["act"], "react");
    assert_eq!(action["to"], "628123@s.whatsapp.net");
    assert_eq!(action["emoji"], "\u{1F44D}");
    assert_eq!(action["key"], json!({ "id": "ABC123", "fromMe": false }));
}

#[tokio::test]
async fn test_preflight_returns_pong() {
    let (app, metrics) = test_app(default_config());
    let body = r#"{"event":"preflight"}"#;
    let request = signed_request(body, "preflight")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true, "pong": true }));
    assert_eq!(metrics.count(WebhookOutcome::Preflight), 1);
}

#[tokio::test]
async fn test_empty_body_is_signed_as_empty_object() {
    let (app, _) = test_app(default_config());
    let digest = sign_payload(b"{}", SECRET, USERNAME, AlgorithmId::Sha256);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-WAREST-Signature", format!("HMAC-SHA256={}", digest))
        .header("X-WAREST-Username", USERNAME)
        .header("X-WAREST-Event", "preflight")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pong"], true);
}

#[tokio::test]
async fn test_bad_signature_returns_401() {
    let (app, metrics) = test_app(default_config());
    let body = message_body("test");
    let request = signed_request(&body, "message_received")
        .body(Body::from(message_body("tampered")))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({ "ok": false, "error": "bad signature" }));
    assert_eq!(metrics.count(WebhookOutcome::Rejected("bad_signature")), 1);
}

#[tokio::test]
async fn test_missing_signature_returns_401() {
    let (app, _) = test_app(default_config());
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-WAREST-Event", "preflight")
        .body(Body::from(r#"{"event":"preflight"}"#))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "bad signature");
}

#[tokio::test]
async fn test_stale_timestamp_returns_401() {
    let (app, metrics) = test_app(default_config().with_timestamp_verification(300));
    let stale = chrono::Utc::now().timestamp_millis() - 301_000;
    let body = r#"{"event":"preflight"}"#;
    let request = signed_request(body, "preflight")
        .header("X-WAREST-Timestamp", stale.to_string())
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({ "ok": false, "error": "stale timestamp" }));
    assert_eq!(metrics.count(WebhookOutcome::Rejected("stale_timestamp")), 1);
}

#[tokio::test]
async fn test_fresh_timestamp_is_accepted() {
    let (app, _) = test_app(default_config().with_timestamp_verification(300));
    let now = chrono::Utc::now().timestamp_millis();
    let body = r#"{"event":"preflight"}"#;
    let request = signed_request(body, "preflight")
        .header("X-WAREST-Timestamp", now.to_string())
        .body(Body::from(body))
        .unwrap();

    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_timestamp_fails_closed() {
    let (app, _) = test_app(default_config().with_timestamp_verification(300));
    let body = r#"{"event":"preflight"}"#;
    let request = signed_request(body, "preflight")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "timestamp error");
}

#[tokio::test]
async fn test_event_falls_back_to_body() {
    let (app, _) = test_app(default_config());
    let body = r#"{"event":"preflight"}"#;
    let digest = sign_payload(body.as_bytes(), SECRET, USERNAME, AlgorithmId::Sha256);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-WAREST-Signature", format!("HMAC-SHA256={}", digest))
        .header("X-WAREST-Username", USERNAME)
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pong"], true);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app(default_config());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_endpoint_renders_counters() {
    let (app, metrics) = test_app(default_config());
    metrics.record(WebhookOutcome::Accepted);

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; version=0.0.4"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#"webhooks_received_total{outcome="accepted"} 1"#));
}

#[tokio::test]
async fn test_latin1_username_header_verifies() {
    let (app, _) = test_app(default_config());
    let body = r#"{"event":"preflight"}"#;
    let digest = sign_payload(body.as_bytes(), SECRET, "jos\u{e9}", AlgorithmId::Sha256);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("X-WAREST-Signature", format!("HMAC-SHA256={}", digest))
        .header(
            "X-WAREST-Username",
            axum::http::HeaderValue::from_bytes(b"jos\xe9").unwrap(),
        )
        .header("X-WAREST-Event", "preflight")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true, "pong": true }));
}
