//! Tests for routes module

use super::*;
use crate::NoOpWebhookMetrics;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use receiver_core::{ReceiverConfig, SecretSet};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> Router {
    let config = ReceiverConfig::new(SecretSet::new(["secret"]).unwrap());
    create_router(AppState::new(config, Arc::new(NoOpWebhookMetrics::new())))
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let request = Request::builder()
        .uri("/api/v1/webhook")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_webhook_rejects_get() {
    let request = Request::builder()
        .method("GET")
        .uri("/webhook")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_route_is_public() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
