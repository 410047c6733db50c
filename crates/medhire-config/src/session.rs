//! Session persistence and expiry settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest accepted session lifetime: one year.
pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;

const fn default_expiry_hours() -> i64 {
    24
}

const fn default_persist_token() -> bool {
    false
}

fn default_country_code() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cache the backend token client-side and persist it across restarts.
    ///
    /// When `false` the session relies on the backend's cookie alone and no
    /// token is ever written to disk.
    #[serde(default = "default_persist_token")]
    pub persist_token: bool,

    /// Age after which a held session is treated as invalid.
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: i64,

    /// Dialing code applied to phone targets entered without one.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    /// Directory holding persisted session keys. Defaults to
    /// `<data_dir>/medhire` when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_token: default_persist_token(),
            expiry_hours: default_expiry_hours(),
            default_country_code: default_country_code(),
            storage_dir: None,
        }
    }
}

impl SessionConfig {
    /// Resolve the storage directory, falling back to the platform data dir.
    #[must_use]
    pub fn resolved_storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("medhire")))
    }
}
