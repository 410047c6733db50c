//! End-to-end session flows against a scripted backend.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use medhire_client::endpoints;
use medhire_client::test_support::ScriptedTransport;
use medhire_session::{
    FileStorage, MemoryStorage, ProfileRefresh, Rehydration, SessionSettings, SessionStorage,
    SessionStore, StorageKey,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn token_settings() -> SessionSettings {
    SessionSettings {
        persist_token: true,
        ..SessionSettings::default()
    }
}

fn ok() -> Value {
    json!({"success": true, "message": "OK"})
}

fn verified(token: &str) -> Value {
    json!({"success": true, "message": "Login successful", "data": {"token": token}})
}

fn account() -> Value {
    json!({
        "success": true,
        "data": {
            "profile": {
                "id": 7, "user_id": 3,
                "company_name": "Harbor Health Staffing",
                "organization_type": "hospital",
                "contact_person": "Sam Ito",
                "status": "pending",
                "created_at": "2025-06-02T14:30:00Z",
                "updated_at": "2025-06-02T14:30:00Z"
            },
            "documents": []
        }
    })
}

fn persisted_token(hours_ago: i64) -> String {
    json!({
        "token": "tok-old",
        "issued_at": Utc::now() - TimeDelta::hours(hours_ago),
    })
    .to_string()
}

#[rstest]
#[case("recruiter@harbor.example")]
#[case("+15551234567@sms.example")]
#[case("a@b")]
#[tokio::test]
async fn at_sign_always_means_email(#[case] target: &str) {
    let store = SessionStore::new(
        ScriptedTransport::new().respond(ok()),
        Arc::new(MemoryStorage::new()),
        SessionSettings::default(),
    );

    let result = store.send_otp(target, None, None).await;
    assert!(result.ok);

    let state = store.snapshot();
    let credential = state.otp_credential().expect("pending credential");
    assert_eq!(credential.target_type.as_str(), "email");
}

#[rstest]
#[case("(613) 765-4321", "1", "+16137654321")]
#[case("1-613-765-4321", "1", "+16137654321")]
#[case("020 7946 0018", "44", "+442079460018")]
#[case("+44 20 7946 0018", "1", "+442079460018")]
#[case("447911123456", "44", "+447911123456")]
#[tokio::test]
async fn phone_targets_are_sent_in_e164(
    #[case] input: &str,
    #[case] country_code: &str,
    #[case] expected: &str,
) {
    let transport = Arc::new(ScriptedTransport::new().respond(ok()));
    let store = SessionStore::new(
        Arc::clone(&transport),
        Arc::new(MemoryStorage::new()),
        SessionSettings::default(),
    );

    store.send_otp(input, None, Some(country_code)).await;

    let call = transport.last_call().expect("send-otp call");
    assert_eq!(call.endpoint, endpoints::SEND_OTP);
    assert_eq!(call.request.json_body().expect("json body")["phone"], expected);
}

#[tokio::test]
async fn verify_before_send_never_touches_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let store = SessionStore::new(
        Arc::clone(&transport),
        Arc::new(MemoryStorage::new()),
        SessionSettings::default(),
    );

    let result = store.verify_otp("123456", true).await;

    assert!(!result.ok);
    assert_eq!(
        result.message.as_deref(),
        Some("Session expired. Please request a new OTP.")
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn token_login_persists_and_rehydrates() {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    let transport = ScriptedTransport::new()
        .respond(ok())
        .respond(verified("tok-123"))
        .respond(account());
    let store = SessionStore::new(transport, Arc::clone(&storage), token_settings());

    store.send_otp("sam@harbor.example", None, None).await;
    let result = store.verify_otp("482913", true).await;
    assert!(result.ok);
    assert_eq!(store.token().as_deref(), Some("tok-123"));

    assert!(storage.load(StorageKey::Token).unwrap().is_some());
    assert!(storage.load(StorageKey::Profile).unwrap().is_some());
    assert!(storage.load(StorageKey::Documents).unwrap().is_some());

    let (restored, outcome) =
        SessionStore::rehydrate(ScriptedTransport::new(), storage, token_settings()).await;

    assert_eq!(outcome, Rehydration::Restored);
    assert!(restored.is_authenticated());
    assert_eq!(restored.token().as_deref(), Some("tok-123"));
    assert_eq!(
        restored
            .recruiter_profile()
            .and_then(|p| p.company_name),
        Some("Harbor Health Staffing".to_string())
    );
}

#[tokio::test]
async fn token_mode_requires_token_in_verify_response() {
    let store = SessionStore::new(
        ScriptedTransport::new().respond(ok()).respond(ok()),
        Arc::new(MemoryStorage::new()),
        token_settings(),
    );

    store.send_otp("sam@harbor.example", None, None).await;
    let result = store.verify_otp("482913", false).await;

    assert!(!result.ok);
    assert!(!store.is_authenticated());
    assert!(store.otp_credential().is_some());
}

#[rstest]
#[case::day_old(25)]
#[case::week_old(24 * 7)]
#[tokio::test]
async fn stale_persisted_token_rehydrates_signed_out(#[case] hours_ago: i64) {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    storage
        .store(StorageKey::Token, &persisted_token(hours_ago))
        .unwrap();
    storage
        .store(StorageKey::Profile, &account()["data"]["profile"].to_string())
        .unwrap();

    let transport = Arc::new(ScriptedTransport::new().respond(ok()));
    let (store, outcome) =
        SessionStore::rehydrate(Arc::clone(&transport), Arc::clone(&storage), token_settings())
            .await;

    assert_eq!(outcome, Rehydration::Expired);
    assert!(!store.is_authenticated());
    assert!(store.snapshot().is_empty());
    assert!(storage.load(StorageKey::Token).unwrap().is_none());
    assert!(storage.load(StorageKey::Profile).unwrap().is_none());
    assert_eq!(transport.last_call().unwrap().endpoint, endpoints::LOGOUT);
}

#[tokio::test]
async fn undated_persisted_token_is_treated_as_expired() {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    storage
        .store(StorageKey::Token, &json!({"token": "tok"}).to_string())
        .unwrap();

    let (store, outcome) =
        SessionStore::rehydrate(ScriptedTransport::new(), storage, token_settings()).await;

    assert_eq!(outcome, Rehydration::Expired);
    assert!(store.token().is_none());
}

#[tokio::test]
async fn corrupt_persisted_token_is_discarded() {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    storage.store(StorageKey::Token, "not json").unwrap();

    let (store, outcome) =
        SessionStore::rehydrate(ScriptedTransport::new(), Arc::clone(&storage), token_settings())
            .await;

    assert_eq!(outcome, Rehydration::Empty);
    assert!(store.snapshot().is_empty());
    assert!(storage.load(StorageKey::Token).unwrap().is_none());
}

#[tokio::test]
async fn cookie_mode_ignores_persisted_token() {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    storage
        .store(StorageKey::Token, &persisted_token(1))
        .unwrap();
    storage.store(StorageKey::Cookies, "[]").unwrap();

    let (store, outcome) = SessionStore::rehydrate(
        ScriptedTransport::new(),
        Arc::clone(&storage),
        SessionSettings::default(),
    )
    .await;

    assert_eq!(outcome, Rehydration::Empty);
    assert!(!store.is_authenticated());
    assert!(storage.load(StorageKey::Token).unwrap().is_none());
    assert_eq!(storage.load(StorageKey::Cookies).unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn logout_clears_everything_even_on_transport_failure() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(dir.path()));
    let transport = ScriptedTransport::new()
        .respond(ok())
        .respond(verified("tok-9"))
        .respond(account())
        .fail(medhire_client::ApiError::Transport("connection reset".into()));
    let store = SessionStore::new(transport, Arc::clone(&storage), token_settings());

    store.send_otp("sam@harbor.example", None, None).await;
    store.verify_otp("482913", true).await;
    storage.store(StorageKey::Cookies, "[\"laravel_session=abc\"]").unwrap();
    assert!(store.is_authenticated());

    store.logout().await;

    let state = store.snapshot();
    assert!(state.token().is_none());
    assert!(state.token_set_at().is_none());
    assert!(state.recruiter_profile().is_none());
    assert!(state.recruiter_documents().is_none());
    assert!(state.otp_credential().is_none());
    for key in StorageKey::ALL {
        assert!(storage.load(key).unwrap().is_none(), "{} survived logout", key.as_str());
    }
}

#[tokio::test]
async fn sign_in_after_logout_revives_the_session() {
    let store = SessionStore::new(
        ScriptedTransport::new()
            .respond(ok())
            .respond(ok())
            .respond(verified("tok-2")),
        Arc::new(MemoryStorage::new()),
        token_settings(),
    );
    assert!(!store.session_discarded());

    store.logout().await;
    assert!(store.session_discarded());

    store.send_otp("sam@harbor.example", None, None).await;
    assert!(store.session_discarded());
    assert!(store.verify_otp("482913", false).await.ok);
    assert!(!store.session_discarded());
}

#[tokio::test]
async fn profile_failure_clears_stale_profile() {
    let store = SessionStore::new(
        ScriptedTransport::new()
            .respond(account())
            .fail(medhire_client::ApiError::Status {
                status: 500,
                message: "Server Error".into(),
                errors: Vec::new(),
            }),
        Arc::new(MemoryStorage::new()),
        SessionSettings::default(),
    );

    assert_eq!(store.load_profile().await, ProfileRefresh::Loaded);
    assert_eq!(store.load_profile().await, ProfileRefresh::ClearedDueToError);
    assert!(store.recruiter_profile().is_none());
    assert!(store.recruiter_documents().is_none());
}

#[tokio::test]
async fn fresh_session_needs_no_refresh() {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    let settings = SessionSettings {
        persist_token: true,
        expiry: TimeDelta::hours(2),
        ..SessionSettings::default()
    };
    storage
        .store(StorageKey::Token, &persisted_token(1))
        .unwrap();

    let transport = Arc::new(ScriptedTransport::new());
    let (store, outcome) = SessionStore::rehydrate(Arc::clone(&transport), storage, settings).await;
    assert_eq!(outcome, Rehydration::Restored);

    assert!(!store.ensure_fresh().await);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn expired_session_is_logged_out_before_profile_fetch() {
    let settings = SessionSettings {
        expiry: TimeDelta::milliseconds(5),
        ..SessionSettings::default()
    };
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(ok())
            .respond(ok())
            .respond(ok()),
    );
    let store = SessionStore::new(
        Arc::clone(&transport),
        Arc::new(MemoryStorage::new()),
        settings,
    );

    store.send_otp("sam@harbor.example", None, None).await;
    store.verify_otp("482913", false).await;
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;

    assert_eq!(store.load_profile().await, ProfileRefresh::SessionExpired);
    assert!(store.snapshot().is_empty());

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].endpoint, endpoints::LOGOUT);
}
