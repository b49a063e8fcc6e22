//! Cache layer for API responses
//!
//! Responses are cached as raw bytes in a key-value store with a TTL. The
//! `CacheStore` trait is the seam between the dispatcher and the store:
//! `RedisStore` is the production backend, `MemoryStore` keeps entries in
//! process. Keys are derived by [`cache_key`].

mod key;
mod memory;
mod redis_store;
mod store;

pub use key::{cache_key, CACHE_NAMESPACE};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheStore};
