//! Redis-backed cache store
//!
//! Values are written as the raw response bytes with no extra framing, so
//! other tools reading the same Redis instance see exactly what the API
//! returned.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use url::Url;

use super::store::{CacheError, CacheStore};
use crate::config::RedisConfig;

/// Connect timeout when the client has no transport timeout
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-command timeout when the client has no transport timeout
const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Cache store backed by a Redis server
///
/// Holds a `ConnectionManager`, which multiplexes one connection and
/// reconnects on failure. Each call works on its own clone of the manager.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Opens a connection to the Redis server described by `config`
    ///
    /// # Arguments
    /// * `config` - Address, password and database index
    /// * `timeout` - Bound on connecting and on every command; `None` uses
    ///   5 s to connect and 3 s per command
    ///
    /// # Returns
    /// * `Ok(RedisStore)` once the connection is established
    /// * `Err(CacheError)` if the parameters are invalid, the server refuses
    ///   the connection or does not answer in time. The first connect is
    ///   attempted once, without backoff.
    pub async fn connect(config: &RedisConfig, timeout: Option<Duration>) -> Result<Self, CacheError> {
        let url = connection_url(config)?;
        let client = redis::Client::open(url.as_str())?;
        let connection = ConnectionManager::new_with_config(client, manager_config(timeout)).await?;
        Ok(Self { connection })
    }
}

fn manager_config(timeout: Option<Duration>) -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_number_of_retries(0)
        .set_connection_timeout(timeout.unwrap_or(DEFAULT_CONNECTION_TIMEOUT))
        .set_response_timeout(timeout.unwrap_or(DEFAULT_RESPONSE_TIMEOUT))
}

/// Builds a `redis://` URL from address, password and database index
fn connection_url(config: &RedisConfig) -> Result<Url, CacheError> {
    let mut url = Url::parse(&format!("redis://{}/{}", config.addr, config.db))
        .map_err(|e| CacheError::Unavailable(format!("invalid address '{}': {}", config.addr, e)))?;

    if !config.password.is_empty() {
        url.set_password(Some(&config.password))
            .map_err(|_| CacheError::Unavailable("cannot set password on address".to_string()))?;
    }

    Ok(url)
}

/// How an entry's TTL is sent to Redis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expiry {
    /// `SET` without expiry
    Never,
    /// `SETEX`
    Seconds(u64),
    /// `PSETEX`, never below 1 ms since Redis rejects 0
    Millis(u64),
}

impl Expiry {
    fn from_ttl(ttl: Duration) -> Self {
        if ttl.is_zero() {
            Expiry::Never
        } else if ttl.subsec_nanos() == 0 {
            Expiry::Seconds(ttl.as_secs())
        } else {
            let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            Expiry::Millis(millis.max(1))
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        match Expiry::from_ttl(ttl) {
            Expiry::Never => {
                let _: () = conn.set(key, value).await?;
            }
            Expiry::Seconds(secs) => {
                let _: () = conn.set_ex(key, value, secs).await?;
            }
            Expiry::Millis(millis) => {
                let _: () = conn.pset_ex(key, value, millis).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_url_without_password() {
        let config = RedisConfig {
            addr: "localhost:6379".to_string(),
            password: String::new(),
            db: 2,
        };
        let url = connection_url(&config).unwrap();
        assert_eq!(url.as_str(), "redis://localhost:6379/2");
    }

    #[test]
    fn test_connection_url_encodes_password() {
        let config = RedisConfig {
            addr: "10.0.0.5:6380".to_string(),
            password: "p@ss word".to_string(),
            db: 0,
        };
        let url = connection_url(&config).unwrap();
        assert_eq!(url.host_str(), Some("10.0.0.5"));
        assert_eq!(url.port(), Some(6380));
        assert_eq!(url.password(), Some("p%40ss%20word"));
        assert_eq!(url.path(), "/0");
    }

    #[test]
    fn test_expiry_from_ttl() {
        assert_eq!(Expiry::from_ttl(Duration::ZERO), Expiry::Never);
        assert_eq!(Expiry::from_ttl(Duration::from_secs(300)), Expiry::Seconds(300));
        assert_eq!(Expiry::from_ttl(Duration::from_millis(1500)), Expiry::Millis(1500));
    }

    #[test]
    fn test_sub_millisecond_ttl_rounds_up() {
        assert_eq!(Expiry::from_ttl(Duration::from_micros(10)), Expiry::Millis(1));
        assert_eq!(Expiry::from_ttl(Duration::from_nanos(1)), Expiry::Millis(1));
    }

    #[test]
    fn test_connection_url_rejects_garbage_address() {
        let config = RedisConfig {
            addr: "bad host:notaport".to_string(),
            password: String::new(),
            db: 0,
        };
        assert!(matches!(
            connection_url(&config),
            Err(CacheError::Unavailable(_))
        ));
    }
}
