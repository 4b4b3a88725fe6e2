// Local key-value store for credentials and cached entitlement flags.
// Backed by sled on disk; an in-memory variant serves tests.

use sled::Db;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const IS_PRO_KEY: &str = "is_pro";

const SECURE_TREE: &str = "secure_store";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },

    #[error("Store operation failed: {0}")]
    Backend(#[from] sled::Error),

    #[error("Stored value for {0} is not valid UTF-8")]
    Corrupt(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Could not find home directory")]
    NoHome,
}

/// Key-value wrapper over local persistent storage
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn access_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get(REFRESH_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Store a new token pair. A missing refresh token keeps the current one.
    fn set_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), StorageError> {
        self.set(ACCESS_TOKEN_KEY, access)?;
        if let Some(refresh) = refresh {
            self.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    fn clear_tokens(&self) -> Result<(), StorageError> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)?;
        self.remove(IS_PRO_KEY)
    }

    fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.access_token()?.is_some())
    }

    fn cached_pro_flag(&self) -> Result<bool, StorageError> {
        Ok(self.get(IS_PRO_KEY)?.as_deref() == Some("true"))
    }

    fn cache_pro_flag(&self, is_pro: bool) -> Result<(), StorageError> {
        self.set(IS_PRO_KEY, if is_pro { "true" } else { "false" })
    }
}

/// Token store persisted with the sled embedded database
pub struct SledTokenStore {
    db: Db,
}

impl SledTokenStore {
    /// Get store directory path (~/.ironlog/store)
    pub fn default_path() -> Result<PathBuf, StorageError> {
        // Check for test environment variable first
        if let Ok(path) = std::env::var("IRONLOG_STORE_PATH") {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or(StorageError::NoHome)?;
        Ok(home.join(".ironlog").join("store"))
    }

    /// Open the store at the default location
    pub fn init() -> Result<Self, StorageError> {
        Self::open(&Self::default_path()?)
    }

    /// Open the store at a specific path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        tracing::debug!("Opening token store at {:?}", path);

        let db = sled::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { db })
    }
}

impl TokenStore for SledTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let tree = self.db.open_tree(SECURE_TREE)?;

        match tree.get(key.as_bytes())? {
            Some(value) => String::from_utf8(value.to_vec())
                .map(Some)
                .map_err(|_| StorageError::Corrupt(key.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let tree = self.db.open_tree(SECURE_TREE)?;
        tree.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;

        tracing::debug!("Stored {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let tree = self.db.open_tree(SECURE_TREE)?;
        if tree.remove(key.as_bytes())?.is_some() {
            self.db.flush()?;
            tracing::debug!("Removed {}", key);
        }
        Ok(())
    }
}

/// Process-local token store
#[derive(Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for tests
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.write() {
            values.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
            values.insert(REFRESH_TOKEN_KEY.to_string(), refresh.to_string());
        }
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sled_store_persists_tokens() -> anyhow::Result<()> {
        let dir = tempdir()?;

        {
            let store = SledTokenStore::open(dir.path())?;
            store.set_tokens("access-1", Some("refresh-1"))?;
        }

        let store = SledTokenStore::open(dir.path())?;
        assert_eq!(store.access_token()?, Some("access-1".to_string()));
        assert_eq!(store.refresh_token()?, Some("refresh-1".to_string()));
        assert!(store.is_authenticated()?);
        Ok(())
    }

    #[test]
    fn test_set_tokens_keeps_refresh_when_not_rotated() -> anyhow::Result<()> {
        let store = MemoryTokenStore::with_tokens("old", "refresh");
        store.set_tokens("new", None)?;

        assert_eq!(store.access_token()?, Some("new".to_string()));
        assert_eq!(store.refresh_token()?, Some("refresh".to_string()));
        Ok(())
    }

    #[test]
    fn test_clear_tokens_drops_cached_flags() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = SledTokenStore::open(dir.path())?;
        store.set_tokens("a", Some("r"))?;
        store.cache_pro_flag(true)?;

        store.clear_tokens()?;

        assert!(!store.is_authenticated()?);
        assert_eq!(store.refresh_token()?, None);
        assert!(!store.cached_pro_flag()?);
        Ok(())
    }

    #[test]
    fn test_empty_token_is_not_authenticated() -> anyhow::Result<()> {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "")?;
        assert!(!store.is_authenticated()?);
        Ok(())
    }
}
