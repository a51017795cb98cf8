use async_trait::async_trait;
use bff_http::{HttpClient, HttpError};
use bytes::Bytes;
use http::StatusCode;
use tracing::{instrument, warn};
use url::Url;

use crate::domain::ports::{CheckoutRequest, CheckoutResponse, CheckoutTransport, TransportError};

/// HTTP adapter implementing the `CheckoutTransport` port.
///
/// Route paths are joined onto `base_url`, which always ends with `/` so a
/// path prefix such as `https://gateway.local/checkout/` is preserved.
/// `HttpClient` is `Clone + Send + Sync`, so no external locking is needed.
pub struct HttpCheckoutTransport {
    client: HttpClient,
    base_url: Url,
}

impl HttpCheckoutTransport {
    #[must_use]
    pub fn new(client: HttpClient, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(format!("cannot resolve '{path}': {e}")))
    }
}

#[async_trait]
impl CheckoutTransport for HttpCheckoutTransport {
    #[instrument(
        skip_all,
        fields(base_url = %self.base_url, method = %request.method, path = %request.path)
    )]
    async fn send(&self, request: CheckoutRequest) -> Result<CheckoutResponse, TransportError> {
        let url = self.resolve(&request.path)?;

        let mut builder = self
            .client
            .request(request.method, url.as_str())
            .header("accept", "application/json");
        if let Some(body) = request.body {
            builder = builder
                .header("content-type", "application/json")
                .body_bytes(body);
        }

        let response = builder.send().await.map_err(map_http_error)?;
        let status = response.status();
        // Non-2xx bodies are read too: they carry the failure envelope.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => body_read_fallback(status, err)?,
        };

        Ok(CheckoutResponse { status, body })
    }
}

/// The response head arrived, so a failing body read is never a connectivity
/// problem. An oversized non-2xx body is dropped and the status line stands in
/// for the failure envelope.
fn body_read_fallback(status: StatusCode, err: HttpError) -> Result<Bytes, TransportError> {
    match err {
        HttpError::BodyTooLarge { limit, actual } if !status.is_success() => {
            warn!(
                status = status.as_u16(),
                limit,
                actual,
                "failure body exceeds size limit, dropped"
            );
            Ok(Bytes::new())
        }
        e => Err(TransportError::InvalidResponse(e.to_string())),
    }
}

fn map_http_error(err: HttpError) -> TransportError {
    match err {
        HttpError::Timeout(timeout) => TransportError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        },
        HttpError::InvalidUri { .. }
        | HttpError::InvalidScheme { .. }
        | HttpError::RequestBuild(_)
        | HttpError::InvalidHeaderName(_)
        | HttpError::InvalidHeaderValue(_) => TransportError::InvalidRequest(err.to_string()),
        e if e.is_connectivity() => TransportError::Unreachable(e.to_string()),
        e => TransportError::InvalidResponse(e.to_string()),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use bff_http::HttpClientBuilder;
    use std::time::Duration;

    fn transport(base: &str) -> HttpCheckoutTransport {
        let client = HttpClientBuilder::new().allow_insecure_http().build().unwrap();
        HttpCheckoutTransport::new(client, Url::parse(base).unwrap())
    }

    #[tokio::test]
    async fn test_base_url_gets_trailing_slash() {
        let t = transport("http://localhost:5006/checkout");
        assert_eq!(t.base_url().as_str(), "http://localhost:5006/checkout/");
        assert_eq!(
            t.resolve("/orders/last").unwrap().as_str(),
            "http://localhost:5006/checkout/orders/last"
        );
    }

    #[tokio::test]
    async fn test_resolve_keeps_trailing_slash_of_route() {
        let t = transport("http://localhost:5006");
        assert_eq!(
            t.resolve("orders/shopping-cart/").unwrap().as_str(),
            "http://localhost:5006/orders/shopping-cart/"
        );
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            map_http_error(HttpError::Timeout(Duration::from_millis(1500))),
            TransportError::Timeout { timeout_ms: 1500 }
        );
        assert!(matches!(
            map_http_error(HttpError::Overloaded),
            TransportError::Unreachable(_)
        ));
        assert!(matches!(
            map_http_error(HttpError::BodyTooLarge {
                limit: 10,
                actual: 11
            }),
            TransportError::InvalidResponse(_)
        ));
        assert!(matches!(
            map_http_error(HttpError::InvalidScheme {
                scheme: "http".to_owned(),
                reason: "TLS required".to_owned(),
            }),
            TransportError::InvalidRequest(_)
        ));
    }

    #[derive(Debug)]
    struct CorruptStream;

    impl std::fmt::Display for CorruptStream {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("invalid gzip header")
        }
    }

    impl std::error::Error for CorruptStream {}

    #[test]
    fn test_body_read_failure_is_invalid_response() {
        let corrupt = HttpError::Transport(Box::new(CorruptStream));
        let err = body_read_fallback(StatusCode::OK, corrupt).unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));

        let err = body_read_fallback(
            StatusCode::OK,
            HttpError::BodyTooLarge {
                limit: 16,
                actual: 64,
            },
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[test]
    fn test_oversized_failure_body_is_dropped() {
        let body = body_read_fallback(
            StatusCode::BAD_GATEWAY,
            HttpError::BodyTooLarge {
                limit: 16,
                actual: 64,
            },
        )
        .unwrap();
        assert!(body.is_empty());
    }
}
