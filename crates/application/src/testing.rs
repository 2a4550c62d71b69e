//! Fake transports for pipeline tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use ksapi_domain::{Headers, PreparedRequest};

use crate::ports::{RawOutcome, Transport, TransportError};

/// A 2xx/4xx/5xx response with a JSON content type.
pub fn json_response(status: u16, body: &str) -> RawOutcome {
    let mut headers = Headers::new();
    headers.set("Content-Type", "application/json; charset=utf-8");
    RawOutcome::response(status, headers, Some(body.as_bytes().to_vec()))
}

/// Replays scripted outcomes in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<RawOutcome>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: impl IntoIterator<Item = RawOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: PreparedRequest) -> RawOutcome {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| RawOutcome::failed(TransportError::Other("script exhausted".into())))
    }
}

/// Never completes; records when an in-flight call is dropped.
#[derive(Debug, Default)]
pub struct PendingTransport {
    dropped: Arc<AtomicBool>,
}

impl PendingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dropped_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.dropped)
    }
}

struct DropGuard(Arc<AtomicBool>);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for PendingTransport {
    async fn execute(&self, _request: PreparedRequest) -> RawOutcome {
        let _guard = DropGuard(Arc::clone(&self.dropped));
        std::future::pending().await
    }
}
