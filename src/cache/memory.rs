//! In-process cache store
//!
//! Mirrors the Redis store's semantics (whole payloads, per-entry expiry)
//! without a server. Useful for tests and for running the client without a
//! Redis instance.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::store::{CacheError, CacheStore};

/// A stored payload and its expiry
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Raw response bytes
    data: Vec<u8>,
    /// When the entry stops being returned; `None` never expires
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Cache store kept in process memory
///
/// Expired entries are dropped lazily on the next read of their key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys of all live entries, sorted
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Instant::now();
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Unavailable("memory store lock poisoned".to_string()))?;

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.data.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        // A TTL past the clock's range behaves like no expiry.
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Unavailable("memory store lock poisoned".to_string()))?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }
}
