//! E.164 normalization for phone OTP targets.
//!
//! Normalization is permissive: input that does not look like a national
//! number for the given dialing code is returned untouched and the backend
//! gets to decide. The function is pure, so verify re-derives exactly the
//! value that send transmitted.

/// Longest E.164 number, excluding the leading `+`.
const E164_MAX_DIGITS: usize = 15;
/// Shortest number accepted when the caller already supplied a `+`.
const E164_MIN_DIGITS: usize = 8;
/// Shortest national significant number outside the NANP.
const NATIONAL_MIN_DIGITS: usize = 6;
/// Shortest unprefixed input treated as already carrying its dialing code.
/// Shorter inputs that happen to start with the code are national numbers.
const PREFIXED_MIN_DIGITS: usize = 11;

/// Format `input` as `+<country code><national number>`.
///
/// Returns `input` unchanged when it fails the national-number shape check.
///
/// ```
/// use medhire_session::phone::format_phone_to_e164;
///
/// assert_eq!(format_phone_to_e164("6137654321", "1"), "+16137654321");
/// assert_eq!(format_phone_to_e164("123", "1"), "123");
/// ```
#[must_use]
pub fn format_phone_to_e164(input: &str, country_code: &str) -> String {
    normalize(input, country_code).unwrap_or_else(|| input.to_string())
}

/// Strict variant: `None` when the input cannot be normalized.
#[must_use]
pub fn normalize(input: &str, country_code: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')' | '+');
    if !trimmed.chars().all(allowed) || trimmed.rfind('+').is_some_and(|i| i > 0) {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    if trimmed.starts_with('+') {
        return (E164_MIN_DIGITS..=E164_MAX_DIGITS)
            .contains(&digits.len())
            .then(|| format!("+{digits}"));
    }

    let code = dialing_code(country_code)?;
    let national = national_number(&digits, code)?;
    Some(format!("+{code}{national}"))
}

/// Validate a dialing code, tolerating a leading `+`.
fn dialing_code(country_code: &str) -> Option<&str> {
    let code = country_code.trim().trim_start_matches('+');
    let valid = (1..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit());
    valid.then_some(code)
}

fn national_number<'a>(digits: &'a str, code: &str) -> Option<&'a str> {
    if code == "1" {
        // NANP: NXX-NXX-XXXX, optionally prefixed with the trunk `1`.
        let national = match digits.strip_prefix('1') {
            Some(rest) if digits.len() == 11 => rest,
            _ => digits,
        };
        let bytes = national.as_bytes();
        let valid = bytes.len() == 10 && bytes[0] >= b'2' && bytes[3] >= b'2';
        return valid.then_some(national);
    }

    let national = match digits.strip_prefix('0') {
        Some(rest) => rest,
        // Dialing code typed without the `+`.
        None => match digits.strip_prefix(code) {
            Some(rest) if digits.len() >= PREFIXED_MIN_DIGITS => rest,
            _ => digits,
        },
    };
    let valid = national.len() >= NATIONAL_MIN_DIGITS
        && code.len() + national.len() <= E164_MAX_DIGITS
        && !national.starts_with('0');
    valid.then_some(national)
}
