//! Common test utilities: stub transports, tracked bodies, upstream builders

#![allow(dead_code)]

use collector_check::core::network::{HttpTransport, NetworkError, ProbeResponse, RequestWrapper};
use collector_check::core::tasks::{Payload, TaskResult, UpstreamResults};
use std::collections::HashMap;
use std::env;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Body that counts how many times it was dropped
pub struct TrackedBody {
    inner: Cursor<Vec<u8>>,
    released: Arc<AtomicUsize>,
}

impl TrackedBody {
    pub fn new(body: &str, released: Arc<AtomicUsize>) -> Self {
        Self {
            inner: Cursor::new(body.as_bytes().to_vec()),
            released,
        }
    }
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Body whose every read fails
pub struct FailingBody {
    message: String,
    released: Arc<AtomicUsize>,
}

impl FailingBody {
    pub fn new(message: &str, released: Arc<AtomicUsize>) -> Self {
        Self {
            message: message.to_string(),
            released,
        }
    }
}

impl Read for FailingBody {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, self.message.clone()))
    }
}

impl Drop for FailingBody {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
enum StubReply {
    Response { status: u16, body: String },
    ReadError { status: u16, error: String },
    TransportError(String),
}

/// Transport that replays one scripted reply and records every request
pub struct StubTransport {
    reply: StubReply,
    calls: AtomicUsize,
    released: Arc<AtomicUsize>,
    requests: Mutex<Vec<RequestWrapper>>,
}

impl StubTransport {
    fn with_reply(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self::with_reply(StubReply::Response {
            status,
            body: body.to_string(),
        })
    }

    pub fn failing_read(status: u16, error: &str) -> Self {
        Self::with_reply(StubReply::ReadError {
            status,
            error: error.to_string(),
        })
    }

    pub fn unreachable(error: &str) -> Self {
        Self::with_reply(StubReply::TransportError(error.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of response bodies released so far
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RequestWrapper> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for StubTransport {
    fn send(&self, request: &RequestWrapper) -> Result<ProbeResponse, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            StubReply::Response { status, body } => Ok(ProbeResponse::new(
                *status,
                HashMap::new(),
                Box::new(TrackedBody::new(body, Arc::clone(&self.released))),
            )),
            StubReply::ReadError { status, error } => Ok(ProbeResponse::new(
                *status,
                HashMap::new(),
                Box::new(FailingBody::new(error, Arc::clone(&self.released))),
            )),
            StubReply::TransportError(error) => Err(NetworkError::Transport(error.clone())),
        }
    }
}

/// Upstream store holding a RegionDetect result with `regions`
pub fn upstream_with_regions(regions: &[&str]) -> UpstreamResults {
    upstream_with_payload(
        "Base/Config/RegionDetect",
        Payload::Regions(regions.iter().map(|r| r.to_string()).collect()),
    )
}

pub fn upstream_with_payload(id: &str, payload: Payload) -> UpstreamResults {
    [(
        id.to_string(),
        TaskResult::success("detected").with_payload(payload),
    )]
    .into_iter()
    .collect()
}

/// Clears proxy variables for the lifetime of the guard
pub struct IsolatedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl IsolatedEnv {
    pub fn new(vars: &[&str]) -> Self {
        let saved = vars
            .iter()
            .map(|var| (var.to_string(), env::var(var).ok()))
            .collect();
        for var in vars {
            env::remove_var(var);
        }
        Self { saved }
    }

    pub fn set(&self, var: &str, value: &str) {
        env::set_var(var, value);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (var, value) in &self.saved {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }
}
