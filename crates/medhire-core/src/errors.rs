//! Cross-cutting error types.
//!
//! Transport failures live in `medhire-client` (`ApiError`) and session
//! failures in `medhire-session` (`SessionError`). This module only covers
//! errors raised while parsing domain values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A value could not be parsed into a domain enum.
    #[error("invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}
