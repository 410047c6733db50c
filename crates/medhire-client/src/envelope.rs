use medhire_core::Envelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::parse_field_errors;

/// Parse a 2xx body as an [`Envelope`] and enforce its `success` flag.
///
/// `success: false` becomes [`ApiError::Rejected`] with the envelope's
/// message (or `fallback` when it has none) and any field errors.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for unsuccessful envelopes and
/// [`ApiError::Decode`] when the body does not match the expected shape.
pub fn open_envelope<T: DeserializeOwned>(
    body: Value,
    fallback: &str,
) -> Result<Envelope<T>, ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();
        let errors = body.get("errors").map(parse_field_errors).unwrap_or_default();
        return Err(ApiError::Rejected { message, errors });
    }

    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
