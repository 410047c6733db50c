//! The backend's uniform response wrapper and the store-level result shape.

use serde::{Deserialize, Serialize};

/// A single field-level validation failure, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// `{ success, message, data, errors }` as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

/// Outcome of a session-store action.
///
/// Session actions never fail to the caller; every outcome, including
/// transport failures, is reported through this value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult<T = ()> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T> ActionResult<T> {
    #[must_use]
    pub fn success(message: Option<String>) -> Self {
        Self {
            ok: true,
            message,
            data: None,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn success_with(data: T, message: Option<String>) -> Self {
        Self {
            ok: true,
            message,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            data: None,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}
