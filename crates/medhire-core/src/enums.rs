//! Status and classification enums.
//!
//! Job statuses serialize in `SCREAMING_SNAKE_CASE` because that is what the
//! backend stores; target types use `lowercase`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TargetType
// ---------------------------------------------------------------------------

/// Channel an OTP is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Email,
    Phone,
}

impl TargetType {
    /// Infer the channel from a raw target. Anything containing `@` is an
    /// email address, regardless of how many digits it carries.
    #[must_use]
    pub fn infer(target: &str) -> Self {
        if target.contains('@') {
            Self::Email
        } else {
            Self::Phone
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" | "sms" => Ok(Self::Phone),
            _ => Err(CoreError::InvalidValue {
                kind: "target type",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Publication status of a job posting.
///
/// ```text
/// DRAFT → OPEN ⇄ PAUSED
///           ↘      ↙
///           CLOSED
/// ```
///
/// Transitions are enforced server-side; the client only carries the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Draft,
    Open,
    Paused,
    Closed,
}

impl JobStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Open => "OPEN",
            Self::Paused => "PAUSED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "OPEN" => Ok(Self::Open),
            "PAUSED" => Ok(Self::Paused),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(CoreError::InvalidValue {
                kind: "job status",
                value: s.to_string(),
            }),
        }
    }
}
