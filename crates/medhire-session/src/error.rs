use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Backend or transport refused to send the code. Message is verbatim.
    #[error("{0}")]
    OtpSend(String),

    /// Verify was attempted without a pending OTP challenge.
    #[error("Session expired. Please request a new OTP.")]
    SessionExpired,

    /// An authenticated session outlived the expiry window.
    #[error("Your session has expired. Please sign in again.")]
    LoginExpired,

    #[error("Please enter an email address or phone number.")]
    MissingTarget,

    #[error("Please enter the verification code.")]
    MissingCode,

    #[error("Verification succeeded but no session token was returned.")]
    MissingToken,

    #[error("storage error: {0}")]
    Storage(String),
}
