//! vsports API client and request dispatcher
//!
//! Every API call goes through [`VsportsClient::dispatch`], which runs the
//! cache-aside sequence:
//!
//! 1. Derive the cache key from the endpoint and its parameters
//! 2. If caching is enabled, return the stored payload on a hit
//! 3. On a miss (or a failed read), GET `{base_url}/{endpoint}` with the
//!    parameters and a bearer token
//! 4. If caching is enabled, store the raw body with the configured TTL
//!
//! There is one live fetch at most per call and no retry. The HTTP status
//! code is not inspected: any body the server returns is handed back and
//! cached. A failed cache write fails the call even though the fetch
//! succeeded.
//!
//! Concurrent identical misses are not coalesced; each one fetches and
//! writes, and the last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, Dispatch};
use url::Url;

use crate::cache::{cache_key, CacheStore, RedisStore};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Base URL of the vsports API
pub const DEFAULT_BASE_URL: &str = "https://extended.vsports.pt/api";

/// One call to the dispatcher: endpoint path, query parameters and whether
/// the cache is consulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    /// Path relative to the base URL, without a leading slash
    pub path: String,
    /// Query parameters; iteration order is not meaningful
    pub params: HashMap<String, String>,
    /// Read from and write to the cache
    pub use_cache: bool,
}

impl EndpointRequest {
    /// Creates a cached request with no parameters
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: HashMap::new(),
            use_cache: true,
        }
    }

    /// Adds a query parameter, replacing an earlier value for the same name
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets whether the cache is used
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// The key this request is cached under
    pub fn cache_key(&self) -> String {
        cache_key(&self.path, &self.params)
    }
}

/// Client for the vsports API
///
/// Holds the HTTP client and the cache store for its whole lifetime. Both
/// are shared by every call made through this handle, and calls may run
/// concurrently; there is no per-call mutable state.
#[derive(Clone)]
pub struct VsportsClient {
    http_client: Client,
    store: Arc<dyn CacheStore>,
    api_key: String,
    base_url: String,
    cache_ttl: Duration,
    dispatch: Dispatch,
}

impl std::fmt::Debug for VsportsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VsportsClient")
            .field("base_url", &self.base_url)
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}

impl VsportsClient {
    /// Connects to the Redis store from `config` and creates the client
    ///
    /// The configured timeout also bounds the store connect and every store
    /// command, so a stalled Redis cannot hold a call forever.
    ///
    /// # Returns
    /// * `Ok(VsportsClient)` once the store answers a ping
    /// * `Err(ClientError::Connection)` if the store cannot be reached
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let store = RedisStore::connect(&config.redis_config, config.timeout())
            .await
            .map_err(ClientError::Connection)?;
        Self::with_store(config, Arc::new(store)).await
    }

    /// Creates the client on top of an existing cache store
    ///
    /// The store is pinged first; a client is never returned for a store
    /// that does not answer.
    pub async fn with_store(config: ClientConfig, store: Arc<dyn CacheStore>) -> Result<Self> {
        store.ping().await.map_err(ClientError::Connection)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ClientError::RequestBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            store,
            cache_ttl: config.cache_ttl(),
            api_key: config.api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            dispatch: Dispatch::none(),
        })
    }

    /// Sends requests to a different base URL (e.g., a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Routes the client's diagnostics to `dispatch`
    ///
    /// Without this, diagnostics are discarded even if a global subscriber
    /// is installed.
    pub fn with_dispatch(mut self, dispatch: impl Into<Dispatch>) -> Self {
        self.dispatch = dispatch.into();
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs one request through the cache and, on a miss, the API
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The raw response body, from the cache or the API
    /// * `Err(ClientError)` - `RequestBuild`, `Transport`, `BodyRead` or `CacheWrite`
    pub async fn dispatch(&self, request: &EndpointRequest) -> Result<Vec<u8>> {
        self.dispatch_inner(request)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    /// Shorthand for [`dispatch`](Self::dispatch) with a bare path
    pub async fn request(&self, endpoint: &str, use_cache: bool) -> Result<Vec<u8>> {
        self.dispatch(&EndpointRequest::new(endpoint).use_cache(use_cache))
            .await
    }

    async fn dispatch_inner(&self, request: &EndpointRequest) -> Result<Vec<u8>> {
        let key = request.cache_key();

        if request.use_cache {
            match self.store.get(&key).await {
                Ok(Some(cached)) => {
                    debug!(cache_key = %key, "Using cached response");
                    return Ok(cached);
                }
                Ok(None) => debug!(cache_key = %key, "Cache miss"),
                Err(e) => debug!(cache_key = %key, error = %e, "Cache read failed, fetching"),
            }
        }

        let body = self.fetch(request).await?;

        if request.use_cache {
            if let Err(e) = self.store.set(&key, &body, self.cache_ttl).await {
                error!(cache_key = %key, error = %e, "Error setting cache");
                return Err(ClientError::CacheWrite { key, source: e });
            }
            debug!(cache_key = %key, "Cached response");
        }

        Ok(body)
    }

    /// Performs the authenticated GET and reads the whole body
    async fn fetch(&self, request: &EndpointRequest) -> Result<Vec<u8>> {
        let url = self.endpoint_url(&request.path)?;
        debug!(url = %url, "Making request");

        let mut builder = self.http_client.get(url).bearer_auth(&self.api_key);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        let http_request = builder.build().map_err(|e| {
            error!(error = %e, "Error creating request");
            ClientError::RequestBuild(e.to_string())
        })?;

        let response = self
            .http_client
            .execute(http_request)
            .await
            .map_err(|e| {
                error!(error = %e, "Error making request");
                ClientError::Transport(e)
            })?;

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Error reading response body");
            ClientError::BodyRead(e)
        })?;

        Ok(body.to_vec())
    }

    /// Joins the base URL and an endpoint path
    fn endpoint_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| {
            error!(url = %raw, error = %e, "Error creating request");
            ClientError::RequestBuild(format!("invalid URL '{}': {}", raw, e))
        })
    }
}
