use serde::{Deserialize, Serialize};

use crate::enums::TargetType;

/// A pending one-time-passcode challenge.
///
/// Held between a successful send and a successful verify. `target` is
/// exactly what the user typed so it can be shown back to them; the E.164
/// form sent over the wire is re-derived from `target` and `country_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCredential {
    pub target: String,
    pub target_type: TargetType,
    pub country_code: Option<String>,
}
