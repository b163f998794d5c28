use crate::common::{FailingBody, TrackedBody};
use collector_check::core::network::{
    HttpTransport, NetworkError, ProbeResponse, RequestWrapper, PROBE_TIMEOUT,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_request_wrapper_get() {
    let request = RequestWrapper::get("https://collector.newrelic.com/jserrors/ping", PROBE_TIMEOUT);
    assert_eq!(request.method, "GET");
    assert_eq!(request.timeout, Duration::from_secs(30));
}

#[test]
fn test_body_text_releases_stream() {
    let released = Arc::new(AtomicUsize::new(0));
    let response = ProbeResponse::new(
        200,
        HashMap::new(),
        Box::new(TrackedBody::new("pong", Arc::clone(&released))),
    );

    assert_eq!(response.into_body_text().unwrap(), "pong");
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_read_still_releases_stream() {
    let released = Arc::new(AtomicUsize::new(0));
    let response = ProbeResponse::new(
        200,
        HashMap::new(),
        Box::new(FailingBody::new("reset", Arc::clone(&released))),
    );

    let err = response.into_body_text().unwrap_err();
    assert_eq!(err.to_string(), "reset");
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unread_response_releases_on_drop() {
    let released = Arc::new(AtomicUsize::new(0));
    let response = ProbeResponse::new(
        204,
        HashMap::new(),
        Box::new(TrackedBody::new("", Arc::clone(&released))),
    );

    drop(response);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let response = ProbeResponse::new(
        200,
        HashMap::new(),
        Box::new(Cursor::new(vec![b'o', b'k', 0xff])),
    );
    assert_eq!(response.into_body_text().unwrap(), "ok\u{fffd}");
}

#[test]
fn test_header_lookup_is_case_insensitive() {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "text/plain".to_string());
    let response = ProbeResponse::new(200, headers, Box::new(Cursor::new(Vec::new())));

    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("x-missing"), None);
}

#[test]
fn test_closure_is_a_transport() {
    let transport = |request: &RequestWrapper| -> Result<ProbeResponse, NetworkError> {
        Err(NetworkError::Transport(format!("timeout after {:?}", request.timeout)))
    };

    let err = transport
        .send(&RequestWrapper::get("https://example.invalid", Duration::from_secs(1)))
        .unwrap_err();
    assert_eq!(err.to_string(), "timeout after 1s");
}

#[test]
fn test_network_error_messages() {
    assert_eq!(
        NetworkError::Transport("connection refused".to_string()).to_string(),
        "connection refused"
    );
    assert_eq!(
        NetworkError::ProxyError("bad".to_string()).to_string(),
        "Invalid proxy setting: bad"
    );
}

#[cfg(not(feature = "network-probe"))]
#[test]
fn test_offline_transport_always_fails() {
    use collector_check::core::network::OfflineTransport;

    let err = OfflineTransport
        .send(&RequestWrapper::get("https://collector.newrelic.com/jserrors/ping", PROBE_TIMEOUT))
        .unwrap_err();
    assert!(err.to_string().contains("network probing disabled"));
}
