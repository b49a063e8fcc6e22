//! Store abstraction used by the request dispatcher

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a cache store
#[derive(Debug, Error)]
pub enum CacheError {
    /// The Redis server rejected the command or the connection failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The store cannot be used (bad connection parameters, store offline)
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),
}

/// A key-value store holding whole response payloads with an expiry
///
/// Implementations must be safe to share between concurrent calls; the
/// client holds one behind an `Arc` and never locks around it.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), CacheError>;

    /// Reads the payload stored under `key`, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key`, replacing any previous payload
    ///
    /// A zero `ttl` stores the entry without expiry.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;
}
