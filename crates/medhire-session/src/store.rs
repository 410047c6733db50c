use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use medhire_client::{ApiError, ApiRequest, Transport, endpoints, open_envelope};
use medhire_config::SessionConfig;
use medhire_core::{
    ActionResult, OtpCredential, RecruiterAccount, RecruiterDocument, RecruiterProfile, TargetType,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::watch;

use crate::error::SessionError;
use crate::phone::format_phone_to_e164;
use crate::profile::ProfileUpdate;
use crate::state::{ActiveSession, SessionPhase, SessionState};
use crate::storage::{SessionStorage, StorageKey};

const SEND_OTP_FALLBACK: &str = "Failed to send OTP";
const VERIFY_OTP_FALLBACK: &str = "Invalid OTP";
const LOAD_PROFILE_FALLBACK: &str = "Failed to load profile";
const UPDATE_PROFILE_FALLBACK: &str = "Failed to update profile";

/// Strategy and limits for a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Cache the backend token and persist token/profile/documents.
    pub persist_token: bool,
    /// Sessions older than this are logged out before use.
    pub expiry: TimeDelta,
    /// Dialing code used for phone targets entered without one.
    pub default_country_code: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            persist_token: false,
            expiry: TimeDelta::hours(24),
            default_country_code: "1".to_string(),
        }
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            persist_token: config.persist_token,
            expiry: TimeDelta::try_hours(config.expiry_hours).unwrap_or(TimeDelta::MAX),
            default_country_code: config
                .default_country_code
                .trim_start_matches('+')
                .to_string(),
        }
    }
}

/// Result of a best-effort profile refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRefresh {
    /// Profile and documents were replaced with fresh data.
    Loaded,
    /// The fetch failed; profile and documents were cleared.
    ClearedDueToError,
    /// The backend rejected the session (401/419); profile and documents
    /// were cleared.
    Unauthorized,
    /// The session had expired and was logged out before fetching.
    SessionExpired,
}

/// What [`SessionStore::rehydrate`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    /// Nothing usable was stored.
    Empty,
    /// A live session was restored.
    Restored,
    /// A stored session was too old (or undated) and was logged out.
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    token: String,
    #[serde(default)]
    issued_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    #[serde(default)]
    token: Option<String>,
}

/// Recruiter session store.
///
/// One instance per application session; construct it at startup (usually
/// via [`Self::rehydrate`]) and hand it to whatever renders auth state.
pub struct SessionStore<T: Transport> {
    transport: T,
    storage: Arc<dyn SessionStorage>,
    settings: SessionSettings,
    state: watch::Sender<SessionState>,
    discarded: AtomicBool,
}

impl<T: Transport> SessionStore<T> {
    /// A store in the initial empty state. Storage is not read.
    pub fn new(transport: T, storage: Arc<dyn SessionStorage>, settings: SessionSettings) -> Self {
        Self {
            transport,
            storage,
            settings,
            state: watch::Sender::new(SessionState::default()),
            discarded: AtomicBool::new(false),
        }
    }

    /// Restore a persisted session.
    ///
    /// A stored token without an issue time, or older than the expiry window,
    /// is logged out before the store is returned, so callers never observe
    /// a stale session. With token persistence disabled any leftover keys are
    /// discarded.
    pub async fn rehydrate(
        transport: T,
        storage: Arc<dyn SessionStorage>,
        settings: SessionSettings,
    ) -> (Self, Rehydration) {
        let store = Self::new(transport, storage, settings);

        if !store.settings.persist_token {
            store.clear_persisted(&[StorageKey::Token, StorageKey::Profile, StorageKey::Documents]);
            return (store, Rehydration::Empty);
        }

        let persisted = match store.read_json::<PersistedToken>(StorageKey::Token) {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                store.clear_persisted(&[StorageKey::Profile, StorageKey::Documents]);
                return (store, Rehydration::Empty);
            }
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable persisted session");
                store.clear_persisted(&[StorageKey::Token, StorageKey::Profile, StorageKey::Documents]);
                return (store, Rehydration::Empty);
            }
        };

        let fresh = persisted
            .issued_at
            .filter(|issued_at| Utc::now() - *issued_at <= store.settings.expiry);
        let Some(issued_at) = fresh else {
            tracing::info!(
                issued_at = ?persisted.issued_at,
                "persisted session expired; logging out"
            );
            store.logout().await;
            return (store, Rehydration::Expired);
        };

        let account = store.read_persisted_account();
        store.state.send_replace(SessionState {
            phase: SessionPhase::Authenticated(ActiveSession {
                token: Some(persisted.token),
                issued_at,
            }),
            account,
            ..SessionState::default()
        });
        tracing::debug!(%issued_at, "restored persisted session");
        (store, Rehydration::Restored)
    }

    // ── Observation ────────────────────────────────────────────────────

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Authenticated and inside the expiry window.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .borrow()
            .is_authenticated_at(Utc::now(), self.settings.expiry)
    }

    pub fn otp_credential(&self) -> Option<OtpCredential> {
        self.state.borrow().otp_credential().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn token_set_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().token_set_at()
    }

    pub fn recruiter_profile(&self) -> Option<RecruiterProfile> {
        self.state.borrow().recruiter_profile().cloned()
    }

    pub fn recruiter_documents(&self) -> Option<Vec<RecruiterDocument>> {
        self.state.borrow().recruiter_documents().map(<[_]>::to_vec)
    }

    // ── Actions ────────────────────────────────────────────────────────

    /// Request a one-time passcode for `target`.
    ///
    /// `target_type` is inferred from `target` when not given. Phone targets
    /// are sent in E.164 form; the stored credential keeps the raw input.
    pub async fn send_otp(
        &self,
        target: &str,
        target_type: Option<TargetType>,
        country_code: Option<&str>,
    ) -> ActionResult {
        let target = target.trim();
        if target.is_empty() {
            return ActionResult::failure(SessionError::MissingTarget.to_string());
        }

        let target_type = target_type.unwrap_or_else(|| TargetType::infer(target));
        let country_code = match target_type {
            TargetType::Email => None,
            TargetType::Phone => Some(
                country_code
                    .map(|c| c.trim().trim_start_matches('+'))
                    .filter(|c| !c.is_empty())
                    .unwrap_or(&self.settings.default_country_code)
                    .to_string(),
            ),
        };
        let credential = OtpCredential {
            target: target.to_string(),
            target_type,
            country_code,
        };

        self.state.send_modify(|s| {
            s.otp_sending = true;
            s.otp_error = None;
        });

        let body = target_body(&credential, &self.settings.default_country_code);
        let result = self
            .transport
            .send(endpoints::SEND_OTP, ApiRequest::post_json(body))
            .await
            .and_then(|value| open_envelope::<Value>(value, SEND_OTP_FALLBACK));

        match result {
            Ok(envelope) => {
                let leaving_session = self.state.borrow().session().is_some();
                if leaving_session {
                    self.clear_persisted(&[
                        StorageKey::Token,
                        StorageKey::Profile,
                        StorageKey::Documents,
                    ]);
                }
                self.state.send_modify(|s| {
                    s.otp_sending = false;
                    s.phase = SessionPhase::OtpPending(credential);
                    s.account = None;
                });
                tracing::debug!(target_type = %target_type, "OTP sent");
                ActionResult::success(envelope.message)
            }
            Err(error) => {
                let error = SessionError::OtpSend(error.to_string());
                let message = error.to_string();
                self.state.send_modify(|s| {
                    s.otp_sending = false;
                    s.otp_error = Some(message.clone());
                });
                tracing::warn!(%error, "send OTP failed");
                ActionResult::failure(message)
            }
        }
    }

    /// Verify `code` against the pending credential.
    ///
    /// Only reachable after a successful [`Self::send_otp`]; without a pending
    /// credential this returns the session-expired message and sends nothing.
    pub async fn verify_otp(&self, code: &str, load_profile_after: bool) -> ActionResult {
        let Some(credential) = self.otp_credential() else {
            return ActionResult::failure(SessionError::SessionExpired.to_string());
        };

        let code = code.trim();
        if code.is_empty() {
            return ActionResult::failure(SessionError::MissingCode.to_string());
        }

        let mut body = target_body(&credential, &self.settings.default_country_code);
        body["otp"] = Value::String(code.to_string());

        let result = self
            .transport
            .send(endpoints::VALIDATE_OTP, ApiRequest::post_json(body))
            .await
            .and_then(|value| open_envelope::<VerifyData>(value, VERIFY_OTP_FALLBACK));

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(%error, "OTP verification failed");
                return ActionResult::failure(error.to_string());
            }
        };

        let token = envelope.data.and_then(|d| d.token).filter(|t| !t.is_empty());
        if self.settings.persist_token && token.is_none() {
            return ActionResult::failure(SessionError::MissingToken.to_string());
        }

        let session = ActiveSession {
            token: token.filter(|_| self.settings.persist_token),
            issued_at: Utc::now(),
        };
        self.persist_session(&session);
        self.state.send_modify(|s| {
            s.phase = SessionPhase::Authenticated(session);
            s.otp_error = None;
        });
        self.discarded.store(false, Ordering::Release);
        tracing::info!("recruiter signed in");

        if load_profile_after {
            self.load_profile().await;
        }

        ActionResult::success(envelope.message)
    }

    /// Fetch profile and documents, replacing both.
    ///
    /// On any failure both are cleared rather than left stale. A successful
    /// fetch while signed out means the backend cookie is live, so a
    /// cookie-backed session is recorded.
    pub async fn load_profile(&self) -> ProfileRefresh {
        if self.ensure_fresh().await {
            return ProfileRefresh::SessionExpired;
        }

        let result = self
            .transport
            .send(endpoints::PROFILE, ApiRequest::get())
            .await
            .and_then(|value| open_envelope::<RecruiterAccount>(value, LOAD_PROFILE_FALLBACK))
            .and_then(|envelope| {
                envelope
                    .data
                    .ok_or_else(|| ApiError::Decode("profile payload missing".into()))
            });

        match result {
            Ok(account) => {
                self.persist_account(&account);
                self.state.send_modify(|s| {
                    if s.session().is_none() {
                        s.phase = SessionPhase::Authenticated(ActiveSession {
                            token: None,
                            issued_at: Utc::now(),
                        });
                    }
                    s.account = Some(account);
                });
                self.discarded.store(false, Ordering::Release);
                ProfileRefresh::Loaded
            }
            Err(error) => {
                tracing::warn!(%error, "profile load failed; clearing profile");
                self.clear_persisted(&[StorageKey::Profile, StorageKey::Documents]);
                self.state.send_modify(|s| s.account = None);
                if error.is_unauthorized() {
                    ProfileRefresh::Unauthorized
                } else {
                    ProfileRefresh::ClearedDueToError
                }
            }
        }
    }

    /// Upload profile changes; on success the returned profile and documents
    /// replace the held ones.
    pub async fn update_profile(&self, update: ProfileUpdate) -> ActionResult<RecruiterAccount> {
        if self.ensure_fresh().await {
            return ActionResult::failure(SessionError::LoginExpired.to_string());
        }

        let result = self
            .transport
            .send(
                endpoints::PROFILE,
                ApiRequest::post_multipart(update.into_form()),
            )
            .await
            .and_then(|value| open_envelope::<RecruiterAccount>(value, UPDATE_PROFILE_FALLBACK));

        match result {
            Ok(envelope) => match envelope.data {
                Some(account) => {
                    self.persist_account(&account);
                    self.state.send_modify(|s| s.account = Some(account.clone()));
                    ActionResult::success_with(account, envelope.message)
                }
                None => ActionResult::failure(UPDATE_PROFILE_FALLBACK),
            },
            Err(error) => {
                tracing::warn!(%error, "profile update failed");
                let errors = error.field_errors().to_vec();
                ActionResult::failure(error.to_string()).with_errors(errors)
            }
        }
    }

    /// Invalidate the server session (best effort) and reset all local state.
    pub async fn logout(&self) {
        if let Err(error) = self
            .transport
            .send(endpoints::LOGOUT, ApiRequest::post())
            .await
        {
            tracing::debug!(%error, "server logout failed; clearing local session anyway");
        }
        self.force_signed_out();
    }

    /// Reset to the initial empty state without contacting the server.
    pub fn force_signed_out(&self) {
        if let Err(error) = self.storage.clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        self.state.send_replace(SessionState::default());
        self.discarded.store(true, Ordering::Release);
        tracing::info!("recruiter session cleared");
    }

    /// Whether the session was discarded (logout, expiry, or a failed
    /// mount, including during [`Self::rehydrate`]) with no sign-in since.
    pub fn session_discarded(&self) -> bool {
        self.discarded.load(Ordering::Acquire)
    }

    /// Application-start refresh.
    ///
    /// Loads the profile; if that fails, hard-resets auth state so the app
    /// starts signed out instead of trusting a session the backend rejected.
    pub async fn mount(&self) -> ProfileRefresh {
        let refresh = self.load_profile().await;
        if matches!(
            refresh,
            ProfileRefresh::ClearedDueToError | ProfileRefresh::Unauthorized
        ) {
            self.force_signed_out();
        }
        refresh
    }

    /// Log out if the held session has outlived the expiry window.
    ///
    /// Returns `true` when a logout happened.
    pub async fn ensure_fresh(&self) -> bool {
        let expired = self
            .state
            .borrow()
            .session()
            .is_some_and(|s| s.is_expired(Utc::now(), self.settings.expiry));
        if expired {
            tracing::info!("session expired; logging out");
            self.logout().await;
        }
        expired
    }

    // ── Persistence ────────────────────────────────────────────────────

    fn persist_session(&self, session: &ActiveSession) {
        if !self.settings.persist_token {
            return;
        }
        let Some(token) = session.token.clone() else {
            return;
        };
        self.write_json(
            StorageKey::Token,
            &PersistedToken {
                token,
                issued_at: Some(session.issued_at),
            },
        );
    }

    fn persist_account(&self, account: &RecruiterAccount) {
        if !self.settings.persist_token {
            return;
        }
        self.write_json(StorageKey::Profile, &account.profile);
        self.write_json(StorageKey::Documents, &account.documents);
    }

    fn read_persisted_account(&self) -> Option<RecruiterAccount> {
        let profile = match self.read_json::<RecruiterProfile>(StorageKey::Profile) {
            Ok(profile) => profile?,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable persisted profile");
                return None;
            }
        };
        let documents = self
            .read_json::<Vec<RecruiterDocument>>(StorageKey::Documents)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "discarding unreadable persisted documents");
                None
            })
            .unwrap_or_default();
        Some(RecruiterAccount { profile, documents })
    }

    fn read_json<V: serde::de::DeserializeOwned>(
        &self,
        key: StorageKey,
    ) -> Result<Option<V>, SessionError> {
        let Some(raw) = self.storage.load(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SessionError::Storage(format!("parse {}: {e}", key.as_str())))
    }

    fn write_json<V: Serialize>(&self, key: StorageKey, value: &V) {
        let result = serde_json::to_string(value)
            .map_err(|e| SessionError::Storage(format!("serialize {}: {e}", key.as_str())))
            .and_then(|raw| self.storage.store(key, &raw));
        if let Err(error) = result {
            tracing::warn!(%error, key = key.as_str(), "failed to persist session key");
        }
    }

    fn clear_persisted(&self, keys: &[StorageKey]) {
        for key in keys {
            if let Err(error) = self.storage.remove(*key) {
                tracing::warn!(%error, key = key.as_str(), "failed to remove session key");
            }
        }
    }
}

/// Wire form of an OTP target: `{email}` or `{phone, country_code}`.
///
/// Phone numbers are normalized here on every call, so send and verify
/// always transmit the same E.164 value. A phone credential without a
/// recorded dialing code falls back to `default_country_code`.
fn target_body(credential: &OtpCredential, default_country_code: &str) -> Value {
    match credential.target_type {
        TargetType::Email => json!({ "email": credential.target }),
        TargetType::Phone => {
            let code = credential
                .country_code
                .as_deref()
                .unwrap_or(default_country_code);
            json!({
                "phone": format_phone_to_e164(&credential.target, code),
                "country_code": code,
            })
        }
    }
}
