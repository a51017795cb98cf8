//! Domain errors for the checkout gateway.

use checkout_bff_sdk::{CheckoutBffError, ResponseResult};
use thiserror::Error;

use super::ports::TransportError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx body that does not match the expected model.
    #[error("cannot decode {route} response: {message}")]
    Decode { route: String, message: String },

    #[error("cannot encode {route} request: {message}")]
    Encode { route: String, message: String },

    /// Non-2xx answer to a read-only call.
    #[error("{route} answered {status}")]
    Rejected {
        route: String,
        status: u16,
        result: Option<ResponseResult>,
    },
}

impl DomainError {
    #[must_use]
    pub fn decode(route: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            route: route.into(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn encode(route: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            route: route.into(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CheckoutBffError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Transport(TransportError::Timeout { timeout_ms }) => {
                Self::Timeout { timeout_ms }
            }
            DomainError::Transport(TransportError::Unreachable(message)) => {
                Self::Transport { message }
            }
            DomainError::Transport(TransportError::InvalidResponse(message)) => {
                Self::Decode { message }
            }
            DomainError::Transport(TransportError::InvalidRequest(message)) => {
                Self::Internal { message }
            }
            e @ DomainError::Decode { .. } => Self::decode(e.to_string()),
            e @ DomainError::Encode { .. } => Self::encode(e.to_string()),
            DomainError::Rejected { status, result, .. } => Self::Rejected { status, result },
        }
    }
}
