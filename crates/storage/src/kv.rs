//! Key-value store for settings and cached user data
//!
//! This module provides the [`KeyValueStore`] collaborator used by the
//! application contexts, a sled-backed implementation for devices and an
//! in-memory implementation for tests and previews.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sled::Db;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The backing store refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Persistent string store the screens delegate to
///
/// Every operation is a suspending call; callers await it on the UI task and
/// never hold a lock across the await.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every listed key, returning how many were present
    async fn multi_remove(&self, keys: &[&str]) -> Result<usize>;
}

fn check_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(KvError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Key-value store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "medalert_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed key-value store
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read a JSON-encoded value by key
    pub fn read<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Write a JSON-encoded value by key
    pub fn write<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Remove a value by key
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        self.read::<String>(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.write(key, &value)?;
        self.db.flush_async().await?;
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<usize> {
        let mut count = 0;
        for key in keys {
            if self.remove(key)? {
                count += 1;
            }
        }
        self.db.flush_async().await?;
        Ok(count)
    }
}

/// In-memory key-value store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { entries: Arc::new(RwLock::new(map)) }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        Ok(keys.iter().filter(|key| entries.remove(**key).is_some()).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kv_config_builder() {
        let config = KvConfig::new("/tmp/medalert")
            .cache_capacity(1024)
            .use_compression(false)
            .flush_every_ms(None);

        assert_eq!(config.path, "/tmp/medalert");
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = KvStore::in_memory().unwrap();

        store.set("language", "French").await.unwrap();
        assert_eq!(store.get("language").await.unwrap(), Some("French".to_string()));
        assert_eq!(store.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = KvStore::in_memory().unwrap();

        store.set("theme", "light").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_multi_remove() {
        let store = KvStore::in_memory().unwrap();

        store.set("user", "{}").await.unwrap();
        store.set("token", "abc").await.unwrap();
        store.set("language", "English").await.unwrap();

        let removed = store.multi_remove(&["user", "token", "missing"]).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.get("user").await.unwrap(), None);
        assert_eq!(store.get("language").await.unwrap(), Some("English".to_string()));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let store = KvStore::in_memory().unwrap();

        assert!(matches!(store.set("  ", "x").await, Err(KvError::InvalidKey(_))));
        assert!(matches!(store.get("").await, Err(KvError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv").to_string_lossy().to_string();

        let config = KvConfig::new(&path).flush_every_ms(None);

        {
            let store = KvStore::new(config.clone()).unwrap();
            store.set("language", "Spanish").await.unwrap();
        }

        let store = KvStore::new(config).unwrap();
        assert_eq!(store.get("language").await.unwrap(), Some("Spanish".to_string()));
    }

    #[tokio::test]
    async fn test_removals_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv").to_string_lossy().to_string();
        let config = KvConfig::new(&path).flush_every_ms(None);

        {
            let store = KvStore::new(config.clone()).unwrap();
            store.set("user", "{}").await.unwrap();
            store.set("token", "abc").await.unwrap();
            store.set("theme", "dark").await.unwrap();
            assert_eq!(store.multi_remove(&["user", "token"]).await.unwrap(), 2);
        }

        let store = KvStore::new(config).unwrap();
        assert_eq!(store.get("user").await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_typed_read_write() {
        let store = KvStore::in_memory().unwrap();

        store.write("count", &3u32).unwrap();
        let count: Option<u32> = store.read("count").unwrap();
        assert_eq!(count, Some(3));
        assert!(store.remove("count").unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::with_entries([("language", "French"), ("theme", "dark")]);

        assert_eq!(store.get("language").await.unwrap(), Some("French".to_string()));
        assert_eq!(store.multi_remove(&["language", "theme"]).await.unwrap(), 2);
        assert!(store.is_empty().await);
    }
}
