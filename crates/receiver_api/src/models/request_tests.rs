//! Tests for request models

use super::*;
use axum::http::{HeaderName, HeaderValue};

fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    map
}

#[test]
fn test_from_header_map_reads_all_headers() {
    let map = headers(&[
        ("X-WAREST-Signature", "HMAC-SHA256=abc"),
        ("X-WAREST-Signature-Alg", "HMAC-SHA256"),
        ("X-WAREST-Username", "alice"),
        ("X-WAREST-Event", "message_received"),
        ("X-WAREST-Session", "session-1"),
        ("X-WAREST-Timestamp", "1735689600000"),
        ("X-WAREST-Event-Id", "evt-1"),
        ("X-WAREST-Version", "1"),
    ]);

    let parsed = WebhookHeaders::from_header_map(&map);

    assert_eq!(parsed.signature.as_deref(), Some("HMAC-SHA256=abc"));
    assert_eq!(parsed.signature_alg.as_deref(), Some("HMAC-SHA256"));
    assert_eq!(parsed.username.as_deref(), Some("alice"));
    assert_eq!(parsed.event.as_deref(), Some("message_received"));
    assert_eq!(parsed.session.as_deref(), Some("session-1"));
    assert_eq!(parsed.timestamp.as_deref(), Some("1735689600000"));
    assert_eq!(parsed.event_id.as_deref(), Some("evt-1"));
    assert_eq!(parsed.version.as_deref(), Some("1"));
}

#[test]
fn test_from_header_map_missing_headers_are_none() {
    let parsed = WebhookHeaders::from_header_map(&HeaderMap::new());
    assert_eq!(parsed, WebhookHeaders::default());
}

#[test]
fn test_latin1_username_is_decoded() {
    let mut map = HeaderMap::new();
    map.insert(USERNAME_HEADER, HeaderValue::from_bytes(b"jos\xe9").unwrap());

    let parsed = WebhookHeaders::from_header_map(&map);
    assert_eq!(parsed.username.as_deref(), Some("jos\u{e9}"));
}

#[test]
fn test_utf8_username_is_decoded() {
    let mut map = HeaderMap::new();
    map.insert(
        USERNAME_HEADER,
        HeaderValue::from_bytes("jos\u{e9}".as_bytes()).unwrap(),
    );

    let parsed = WebhookHeaders::from_header_map(&map);
    assert_eq!(parsed.username.as_deref(), Some("jos\u{e9}"));
}

#[test]
fn test_header_text_never_drops_bytes() {
    assert_eq!(header_text(b"plain"), "plain");
    assert_eq!(header_text(b"\xff\xfe"), "\u{ff}\u{fe}");
}

#[test]
fn test_as_inbound_borrows_fields() {
    let parsed = WebhookHeaders {
        signature: Some("sig".to_string()),
        username: Some("bob".to_string()),
        ..Default::default()
    };
    let body = b"{}";

    let inbound = parsed.as_inbound(body);
    assert_eq!(inbound.body, b"{}");
    assert_eq!(inbound.signature, Some("sig"));
    assert_eq!(inbound.username, Some("bob"));
    assert_eq!(inbound.algorithm, None);
    assert_eq!(inbound.timestamp, None);
}
