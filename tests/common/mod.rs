//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vsports::cache::{CacheError, CacheStore, MemoryStore};
use vsports::{ClientConfig, VsportsClient};

pub const API_KEY: &str = "test-api-key";

/// Memory store that counts calls and can be told to fail
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub fail_ping: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn ping(&self) -> Result<(), CacheError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("write rejected".to_string()));
        }
        self.inner.set(key, value, ttl).await
    }
}

/// Builds a client pointed at `base_url` on top of `store`
pub async fn client_for(base_url: &str, store: Arc<CountingStore>) -> VsportsClient {
    let config = ClientConfig {
        timeout_seconds: 5,
        cache_duration: 60,
        ..ClientConfig::new(API_KEY)
    };
    VsportsClient::with_store(config, store)
        .await
        .expect("client should build")
        .with_base_url(base_url)
}
