//! Cache provider trait for pluggable caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for key-value cache backends with per-key expiration.
///
/// All values are stored as strings. The provider is responsible for key
/// prefixing and TTL enforcement. Implementations must be safe to share
/// between concurrently running tasks.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key from the cache. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Set a value only if the key is absent (NX).
    ///
    /// Returns `true` if this call created the key. The check and the write
    /// are a single atomic step.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Check whether a key exists in the cache.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Decrement an integer value by 1 and return the new value.
    ///
    /// The remaining TTL of the key is preserved. A missing key is treated
    /// as `0`. Fails if the stored value is not an integer.
    async fn decr(&self, key: &str) -> AppResult<i64>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
