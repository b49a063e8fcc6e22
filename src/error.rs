//! Errors returned by `VsportsClient`
//!
//! Every error reaches the caller of the failing call; nothing is retried.
//! Cache read failures are the one exception: they are treated as a miss
//! and only show up in diagnostics.

use thiserror::Error;

use crate::cache::CacheError;

/// Convenience alias for results of client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when constructing the client or calling the API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The cache store could not be reached while constructing the client
    #[error("Failed to connect to cache store: {0}")]
    Connection(#[source] CacheError),

    /// The request URL or HTTP client could not be built
    #[error("Error creating request: {0}")]
    RequestBuild(String),

    /// The request failed on the network (connect, DNS, timeout)
    #[error("Error making request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read to the end
    #[error("Error reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The fetched payload could not be cached; the payload is discarded
    #[error("Error setting cache for {key}: {source}")]
    CacheWrite {
        key: String,
        #[source]
        source: CacheError,
    },

    /// The payload does not match the expected JSON shape
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}
