//! Observable session state.

use chrono::{DateTime, TimeDelta, Utc};
use medhire_core::{OtpCredential, RecruiterAccount, RecruiterDocument, RecruiterProfile};

/// An established login.
///
/// `token` is only held when the token-centric strategy is enabled; with
/// cookie-centric sessions the backend cookie is the credential and only the
/// establishment time is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub token: Option<String>,
    pub issued_at: DateTime<Utc>,
}

impl ActiveSession {
    /// Whether the session is older than `window` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now - self.issued_at > window
    }
}

/// Where the login flow currently stands. Exactly one holds at a time.
///
/// ```text
/// SignedOut ──send_otp──▶ OtpPending ──verify_otp──▶ Authenticated
///     ▲                                                   │
///     └──────────────── logout / expiry ──────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    SignedOut,
    OtpPending(OtpCredential),
    Authenticated(ActiveSession),
}

/// Everything a view needs to render auth-dependent UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// True while a send-OTP request is in flight.
    pub otp_sending: bool,
    /// Message from the most recent failed send.
    pub otp_error: Option<String>,
    /// Profile and documents, present only for authenticated sessions.
    pub account: Option<RecruiterAccount>,
}

impl SessionState {
    #[must_use]
    pub const fn otp_credential(&self) -> Option<&OtpCredential> {
        match &self.phase {
            SessionPhase::OtpPending(credential) => Some(credential),
            _ => None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&ActiveSession> {
        match &self.phase {
            SessionPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().and_then(|s| s.token.as_deref())
    }

    #[must_use]
    pub fn token_set_at(&self) -> Option<DateTime<Utc>> {
        self.session().map(|s| s.issued_at)
    }

    #[must_use]
    pub fn recruiter_profile(&self) -> Option<&RecruiterProfile> {
        self.account.as_ref().map(|a| &a.profile)
    }

    #[must_use]
    pub fn recruiter_documents(&self) -> Option<&[RecruiterDocument]> {
        self.account.as_ref().map(|a| a.documents.as_slice())
    }

    /// Authenticated and still inside the expiry window.
    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        self.session().is_some_and(|s| !s.is_expired(now, window))
    }

    /// Whether this is the initial empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medhire_core::TargetType;

    fn session_aged(hours: i64) -> ActiveSession {
        ActiveSession {
            token: Some("tok".into()),
            issued_at: Utc::now() - TimeDelta::hours(hours),
        }
    }

    #[test]
    fn fresh_session_is_not_expired() {
        assert!(!session_aged(23).is_expired(Utc::now(), TimeDelta::hours(24)));
    }

    #[test]
    fn old_session_is_expired() {
        assert!(session_aged(25).is_expired(Utc::now(), TimeDelta::hours(24)));
    }

    #[test]
    fn accessors_follow_phase() {
        let pending = SessionState {
            phase: SessionPhase::OtpPending(OtpCredential {
                target: "a@b.co".into(),
                target_type: TargetType::Email,
                country_code: None,
            }),
            ..SessionState::default()
        };
        assert!(pending.otp_credential().is_some());
        assert!(pending.token().is_none());
        assert!(!pending.is_authenticated_at(Utc::now(), TimeDelta::hours(24)));

        let authed = SessionState {
            phase: SessionPhase::Authenticated(session_aged(1)),
            ..SessionState::default()
        };
        assert!(authed.otp_credential().is_none());
        assert_eq!(authed.token(), Some("tok"));
        assert!(authed.token_set_at().is_some());
        assert!(authed.is_authenticated_at(Utc::now(), TimeDelta::hours(24)));
    }

    #[test]
    fn default_state_is_empty() {
        assert!(SessionState::default().is_empty());
    }
}
