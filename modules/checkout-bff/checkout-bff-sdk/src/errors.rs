//! Public error type of the checkout gateway.
//!
//! These are the failures a caller cannot branch on as business outcomes:
//! the service was unreachable, answered with something unreadable, or refused
//! a read-only call. Rejected mutations are not errors; they come back as
//! [`ResponseEnvelope::Failure`](crate::ResponseEnvelope::Failure).

use thiserror::Error;

use crate::envelope::ResponseResult;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutBffError {
    /// The checkout service could not be reached.
    #[error("Checkout service unreachable: {message}")]
    Transport { message: String },

    /// No response within the configured timeout.
    #[error("Checkout service timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// A success response whose body does not match the expected model.
    #[error("Invalid response from checkout service: {message}")]
    Decode { message: String },

    /// A request payload could not be serialized.
    #[error("Failed to encode request: {message}")]
    Encode { message: String },

    /// A read-only call answered with a non-2xx status.
    #[error("Checkout service rejected the request with status {status}")]
    Rejected {
        status: u16,
        result: Option<ResponseResult>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CheckoutBffError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Status code for `Rejected`, `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
