//! Output port towards the checkout service.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use thiserror::Error;

/// One outbound call: verb, route path relative to the service root, optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Bytes>,
}

impl CheckoutRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_json(mut self, body: Vec<u8>) -> Self {
        self.body = Some(Bytes::from(body));
        self
    }

    /// `"METHOD /path"`, as used in spans and error messages.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} /{}", self.method, self.path.trim_start_matches('/'))
    }
}

/// Status and raw body of whatever the service answered, 2xx or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl CheckoutResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures below the HTTP status level: nothing usable came back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("checkout service timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("checkout service unreachable: {0}")]
    Unreachable(String),

    /// The body could not be read (too large, truncated, bad encoding).
    #[error("unreadable response: {0}")]
    InvalidResponse(String),

    /// The request could not be built (URL rejected by the client, bad header).
    #[error("request rejected by client: {0}")]
    InvalidRequest(String),
}

/// Sends requests to the checkout service.
///
/// Implementations must return every HTTP status as `Ok`; status handling
/// belongs to the service.
#[async_trait]
pub trait CheckoutTransport: Send + Sync {
    async fn send(&self, request: CheckoutRequest) -> Result<CheckoutResponse, TransportError>;
}
