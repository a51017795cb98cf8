use crate::config::ERROR_BODY_PREVIEW_LIMIT;
use crate::error::HttpError;
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

/// Boxed response body, already decompressed.
pub type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// Response returned by [`RequestBuilder::send`](crate::RequestBuilder::send).
///
/// Body readers enforce the client's `max_body_size` on decompressed bytes.
/// `bytes()` ignores the status; `json()` and `text()` turn non-2xx into
/// [`HttpError::HttpStatus`].
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<ResponseBody>,
    pub(crate) max_body_size: usize,
}

impl HttpResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Keep the response if it is 2xx. The body is not read.
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` with an empty preview for non-2xx statuses
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.status().is_success() {
            return Ok(self);
        }
        Err(HttpError::HttpStatus {
            status: self.status(),
            body_preview: String::new(),
            content_type: content_type(self.headers()),
        })
    }

    /// Read the whole body regardless of status.
    ///
    /// # Errors
    /// Returns `HttpError::BodyTooLarge` past the size limit, `HttpError::Transport`
    /// if the connection fails mid-body
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        read_limited(self.inner, self.max_body_size).await
    }

    /// Read the body of a 2xx response.
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` (with a body preview) for non-2xx statuses,
    /// plus the errors of [`bytes`](Self::bytes)
    pub async fn checked_bytes(self) -> Result<Bytes, HttpError> {
        let status = self.status();
        if status.is_success() {
            return self.bytes().await;
        }

        let content_type = content_type(self.headers());
        let preview_limit = self.max_body_size.min(ERROR_BODY_PREVIEW_LIMIT);
        let body_preview = match read_limited(self.inner, preview_limit).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
            Err(e) => return Err(e),
        };

        Err(HttpError::HttpStatus {
            status,
            body_preview,
            content_type,
        })
    }

    /// Parse a 2xx body as JSON.
    ///
    /// # Errors
    /// Returns the errors of [`checked_bytes`](Self::checked_bytes) and
    /// `HttpError::Json` if the body does not parse as `T`
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body = self.checked_bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Read a 2xx body as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    /// Returns the errors of [`checked_bytes`](Self::checked_bytes)
    pub async fn text(self) -> Result<String, HttpError> {
        let body = self.checked_bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    #[must_use]
    pub fn into_inner(self) -> Response<ResponseBody> {
        self.inner
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn read_limited(response: Response<ResponseBody>, limit: usize) -> Result<Bytes, HttpError> {
    let mut body = std::pin::pin!(response.into_body());
    let mut collected = BytesMut::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(HttpError::Transport)?;
        if let Some(chunk) = frame.data_ref() {
            let actual = collected.len() + chunk.len();
            if actual > limit {
                return Err(HttpError::BodyTooLarge { limit, actual });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(collected.freeze())
}
