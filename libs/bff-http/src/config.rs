use std::time::Duration;

/// Default User-Agent string for outbound requests
pub const DEFAULT_USER_AGENT: &str = concat!("bff-http/", env!("CARGO_PKG_VERSION"));

/// Default cap on response bodies read into memory (10 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Upper bound on how much of a non-2xx body is kept in [`HttpError::HttpStatus`].
///
/// [`HttpError::HttpStatus`]: crate::HttpError::HttpStatus
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Source of trusted TLS root certificates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TlsRootConfig {
    /// Mozilla roots bundled through webpki-roots
    #[default]
    WebPki,
    /// Roots loaded from the operating system store
    Native,
}

/// Which URL schemes the client accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// `https://` only
    #[default]
    TlsOnly,
    /// `http://` and `https://`.
    ///
    /// Meant for services on a trusted local network and for mock servers in tests.
    AllowInsecureHttp,
}

/// Settings consumed by [`HttpClientBuilder`](crate::HttpClientBuilder)
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout applied to every request (default: 30 seconds)
    pub request_timeout: Duration,

    /// Largest response body, in decompressed bytes, that may be buffered (default: 10 MiB)
    pub max_body_size: usize,

    /// Value of the `User-Agent` header unless the caller sets one
    pub user_agent: String,

    /// Scheme policy (default: `TlsOnly`)
    pub transport: TransportSecurity,

    /// TLS root strategy (default: `WebPki`)
    pub tls_roots: TlsRootConfig,

    /// Number of requests that may wait in the client's buffer (default: 1024).
    ///
    /// When the buffer is full, `send()` fails fast with `HttpError::Overloaded`.
    pub buffer_capacity: usize,

    /// Idle pooled connections are closed after this long (default: 90 seconds)
    pub pool_idle_timeout: Option<Duration>,

    /// Idle connections kept per host (default: 32)
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::default(),
            buffer_capacity: 1024,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
        }
    }
}

impl HttpClientConfig {
    /// Configuration for tests against local mock servers: plain HTTP, short timeout.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            transport: TransportSecurity::AllowInsecureHttp,
            buffer_capacity: 64,
            pool_idle_timeout: Some(Duration::from_secs(5)),
            pool_max_idle_per_host: 4,
            ..Self::default()
        }
    }
}
