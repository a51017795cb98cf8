//! Result envelope for gateway operations.
//!
//! Business failures reported by the checkout service travel as values
//! ([`ResponseEnvelope::Failure`]), not as errors; only transport-level problems
//! are `Err`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Failure body of the checkout service: a title, a status and messages keyed by field.
///
/// The upstream service usually sends `{"title": ..., "status": 400, "errors": {"Messages": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseResult {
    pub title: Option<String>,
    pub status: Option<u16>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ResponseResult {
    /// Envelope key used by the checkout service for general messages.
    pub const MESSAGES_KEY: &'static str = "Messages";

    /// A locally produced 400 with a single message for `field`.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some("One or more validation errors occurred.".to_owned()),
            status: Some(400),
            errors: BTreeMap::from([(field.into(), vec![message.into()])]),
        }
    }

    /// Result for a failure response whose body carried no usable envelope.
    #[must_use]
    pub fn from_status(status: u16, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            status: Some(status),
            errors: BTreeMap::new(),
        }
    }

    /// `true` when at least one message is present.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    /// All messages, in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(String::as_str)
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn field_messages(&self, field: &str) -> &[String] {
        self.errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ResponseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.title, self.status) {
            (Some(title), Some(status)) => write!(f, "{title} ({status})")?,
            (Some(title), None) => f.write_str(title)?,
            (None, Some(status)) => write!(f, "status {status}")?,
            (None, None) => f.write_str("request failed")?,
        }
        for (i, message) in self.messages().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            f.write_str(message)?;
        }
        Ok(())
    }
}

/// Outcome of a gateway call: the success payload or the service's failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ResponseEnvelope<T = ()> {
    Success(T),
    Failure(ResponseResult),
}

impl<T> ResponseEnvelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&ResponseResult> {
        match self {
            Self::Success(_) => None,
            Self::Failure(result) => Some(result),
        }
    }

    /// # Errors
    /// Returns the failure envelope when the call was rejected
    pub fn into_result(self) -> Result<T, ResponseResult> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(result) => Err(result),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        match self {
            Self::Success(value) => ResponseEnvelope::Success(f(value)),
            Self::Failure(result) => ResponseEnvelope::Failure(result),
        }
    }
}

impl ResponseEnvelope<()> {
    /// Successful call without payload.
    pub fn ok() -> Self {
        Self::Success(())
    }
}

impl<T> From<Result<T, ResponseResult>> for ResponseEnvelope<T> {
    fn from(result: Result<T, ResponseResult>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(failure) => Self::Failure(failure),
        }
    }
}
