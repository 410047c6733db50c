//! Durable session keys.
//!
//! The token-centric strategy persists three keys under the `medhire-auth`
//! namespace (token, profile, documents). The CLI additionally keeps the
//! cookie jar here so cookie-backed sessions survive between invocations.
//! Logout clears every key.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use medhire_config::SessionConfig;

use crate::error::SessionError;

pub const NAMESPACE: &str = "medhire-auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    Profile,
    Documents,
    Cookies,
}

impl StorageKey {
    pub const ALL: [Self; 4] = [Self::Token, Self::Profile, Self::Documents, Self::Cookies];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Profile => "profile",
            Self::Documents => "documents",
            Self::Cookies => "cookies",
        }
    }
}

/// Key/value persistence for session data.
pub trait SessionStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the backing store cannot be read.
    fn load(&self, key: StorageKey) -> Result<Option<String>, SessionError>;

    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the value cannot be written.
    fn store(&self, key: StorageKey, value: &str) -> Result<(), SessionError>;

    /// Remove a key. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if an existing value cannot be removed.
    fn remove(&self, key: StorageKey) -> Result<(), SessionError>;

    /// Remove every key, attempting all of them even if one fails.
    ///
    /// # Errors
    ///
    /// Returns the first removal failure.
    fn clear(&self) -> Result<(), SessionError> {
        let mut first_error = None;
        for key in StorageKey::ALL {
            if let Err(error) = self.remove(key) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// One file per key under `<root>/medhire-auth/`, readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(NAMESPACE),
        }
    }

    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if no storage directory is configured
    /// and the platform data directory cannot be determined.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        config
            .resolved_storage_dir()
            .map(Self::new)
            .ok_or_else(|| {
                SessionError::Storage("data directory not found; set session.storage_dir".into())
            })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    fn ensure_dir(&self) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| SessionError::Storage(format!("mkdir {}: {e}", self.dir.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, SessionError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(format!("read {}: {e}", path.display()))),
        }
    }

    fn store(&self, key: StorageKey, value: &str) -> Result<(), SessionError> {
        self.ensure_dir()?;
        let path = self.path(key);
        fs::write(&path, value)
            .map_err(|e| SessionError::Storage(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| SessionError::Storage(format!("chmod {}: {e}", path.display())))?;
        }

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), SessionError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-process storage; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<StorageKey, String>>, SessionError> {
        self.entries
            .lock()
            .map_err(|_| SessionError::Storage("memory storage lock poisoned".into()))
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, SessionError> {
        Ok(self.entries()?.get(&key).cloned())
    }

    fn store(&self, key: StorageKey, value: &str) -> Result<(), SessionError> {
        self.entries()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), SessionError> {
        self.entries()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_load_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());

        assert!(storage.load(StorageKey::Token).unwrap().is_none());
        storage.store(StorageKey::Token, r#"{"token":"abc"}"#).unwrap();
        assert_eq!(
            storage.load(StorageKey::Token).unwrap().as_deref(),
            Some(r#"{"token":"abc"}"#)
        );
        assert!(storage.dir().ends_with(NAMESPACE));

        storage.remove(StorageKey::Token).unwrap();
        assert!(storage.load(StorageKey::Token).unwrap().is_none());
        storage.remove(StorageKey::Token).expect("removing twice is fine");
    }

    #[cfg(unix)]
    #[test]
    fn stored_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        storage.store(StorageKey::Profile, "{}").unwrap();

        let mode = fs::metadata(storage.dir().join("profile"))
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600, "session files should be 0600");
    }

    #[test]
    fn whitespace_only_file_reads_as_missing() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let storage = FileStorage::new(tmp.path());
        storage.store(StorageKey::Documents, "   \n").unwrap();
        assert!(storage.load(StorageKey::Documents).unwrap().is_none());
    }

    #[test]
    fn clear_removes_every_key() {
        let storage = MemoryStorage::new();
        for key in StorageKey::ALL {
            storage.store(key, "x").unwrap();
        }
        storage.clear().unwrap();
        for key in StorageKey::ALL {
            assert!(storage.load(key).unwrap().is_none(), "{} survived", key.as_str());
        }
    }

    #[test]
    fn from_config_uses_explicit_dir() {
        let config = SessionConfig {
            storage_dir: Some(PathBuf::from("/var/tmp/medhire")),
            ..SessionConfig::default()
        };
        let storage = FileStorage::from_config(&config).unwrap();
        assert_eq!(storage.dir(), Path::new("/var/tmp/medhire/medhire-auth"));
    }
}
