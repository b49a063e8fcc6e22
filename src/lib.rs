//! vsports API client
//!
//! A typed client for the vsports sports-data API. Responses are cached as
//! raw bytes in Redis (or any other [`cache::CacheStore`]) with a fixed TTL,
//! using the cache-aside pattern.
//!
//! ```no_run
//! # async fn run() -> vsports::Result<()> {
//! let config = vsports::ClientConfig::new("my-api-key");
//! let client = vsports::VsportsClient::connect(config).await?;
//! let tournaments = client.tournaments(true).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod data;
mod endpoints;
pub mod error;

pub use client::{EndpointRequest, VsportsClient, DEFAULT_BASE_URL};
pub use config::{ClientConfig, ConfigError, RedisConfig};
pub use error::{ClientError, Result};
