//! Normalized API failure.

use medhire_core::FieldError;
use thiserror::Error;

/// Every failure surfaced by the adapter.
///
/// `Display` is the human-readable message only, so callers can show it
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    /// Backend answered 2xx but the envelope said `success: false`.
    #[error("{message}")]
    Rejected {
        message: String,
        errors: Vec<FieldError>,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx body that was not the JSON the caller expected.
    #[error("Unexpected response from server")]
    Decode(String),

    /// The request could not be built (bad base URL, bad multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Field-level validation failures attached to the response, if any.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Status { errors, .. } | Self::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    /// HTTP status, when the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend considers the caller unauthenticated.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 419))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::InvalidRequest(error.to_string())
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = ApiError::Status {
            status: 422,
            message: "The email field is required.".into(),
            errors: Vec::new(),
        };
        assert_eq!(err.to_string(), "The email field is required.");
    }

    #[test]
    fn decode_errors_hide_parser_details() {
        let err = ApiError::Decode("expected value at line 1 column 1".into());
        assert_eq!(err.to_string(), "Unexpected response from server");
    }

    #[test]
    fn unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            message: "Unauthenticated.".into(),
            errors: Vec::new(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::Transport("connection refused".into()).is_unauthorized());
    }
}
