//! Recruiter API paths, relative to the configured base URL.

pub const SEND_OTP: &str = "/recruiter/send-otp";
pub const VALIDATE_OTP: &str = "/recruiter/validate-otp";
pub const PROFILE: &str = "/recruiter/profile";
pub const LOGOUT: &str = "/recruiter/logout";
pub const JOBS: &str = "/recruiter/jobs";

/// Path of a single job. The id is percent-encoded.
#[must_use]
pub fn job(id: &str) -> String {
    format!("{JOBS}/{}", urlencoding::encode(id))
}
