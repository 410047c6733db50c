use std::sync::Arc;

use anyhow::Context;
use medhire_client::ApiClient;
use medhire_config::MedhireConfig;
use medhire_jobs::JobsStore;
use medhire_session::{
    FileStorage, Rehydration, SessionSettings, SessionStorage, SessionStore, StorageKey,
};

/// Shared handles for command handlers.
///
/// One HTTP client (and so one cookie jar) backs both stores.
pub struct AppContext {
    pub config: MedhireConfig,
    pub session: SessionStore<Arc<ApiClient>>,
    pub jobs: JobsStore<Arc<ApiClient>>,
    client: Arc<ApiClient>,
    storage: Arc<FileStorage>,
}

impl AppContext {
    /// Build the client, restore saved cookies, and rehydrate the session.
    pub async fn init(config: MedhireConfig) -> anyhow::Result<Self> {
        let client = Arc::new(ApiClient::new(&config.api).context("failed to build API client")?);
        let storage = Arc::new(
            FileStorage::from_config(&config.session)
                .context("failed to resolve session storage directory")?,
        );

        match storage.load(StorageKey::Cookies) {
            Ok(Some(cookies)) => client.restore_cookies(&cookies),
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "ignoring unreadable saved cookies"),
        }

        let shared: Arc<dyn SessionStorage> = storage.clone();
        let (session, rehydration) = SessionStore::rehydrate(
            Arc::clone(&client),
            shared,
            SessionSettings::from(&config.session),
        )
        .await;
        if rehydration == Rehydration::Expired {
            tracing::info!("saved session had expired; signed out");
        }

        let jobs = JobsStore::new(Arc::clone(&client));

        Ok(Self {
            config,
            session,
            jobs,
            client,
            storage,
        })
    }

    /// Save the cookie jar so the backend session survives until the next run.
    ///
    /// Skipped once the session has been discarded: logout and a failed mount
    /// clear the saved jar, and writing it back would revive the old session.
    pub fn persist_cookies(&self) -> anyhow::Result<()> {
        if self.session.session_discarded() {
            tracing::debug!("session discarded; not saving cookies");
            return Ok(());
        }
        let Some(header) = self.client.cookie_header() else {
            return Ok(());
        };
        self.storage
            .store(StorageKey::Cookies, &header)
            .context("failed to save session cookies")
    }
}
