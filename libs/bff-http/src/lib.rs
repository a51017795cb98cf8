#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Outbound HTTP client used by the BFF gateways.
//!
//! A hyper client behind a small tower stack:
//! - TLS via rustls (HTTPS only unless insecure HTTP is explicitly allowed)
//! - connection pooling
//! - per-request timeout
//! - `User-Agent` injection
//! - transparent gzip / brotli / deflate decompression
//! - a request buffer that makes the client `Clone + Send + Sync` and fails
//!   fast with [`HttpError::Overloaded`] when full
//!
//! Retries are deliberately absent: callers decide whether an operation is safe
//! to repeat.
//!
//! ```ignore
//! use bff_http::HttpClient;
//!
//! let client = HttpClient::builder().build()?;
//! let response = client
//!     .post("https://checkout.local/orders")
//!     .json(&transaction)?
//!     .send()
//!     .await?;
//!
//! if response.status().is_success() { /* ... */ }
//! let body = response.bytes().await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;
pub mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_MAX_BODY_SIZE, DEFAULT_USER_AGENT, ERROR_BODY_PREVIEW_LIMIT, HttpClientConfig,
    TlsRootConfig, TransportSecurity,
};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{UserAgentLayer, UserAgentService};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
