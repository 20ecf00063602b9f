//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};

use sharelink_core::config::cache::MemoryCacheConfig;
use sharelink_core::error::AppError;
use sharelink_core::result::AppResult;
use sharelink_core::traits::cache::CacheProvider;

/// A cached value with the TTL it was written with.
///
/// `ttl == None` marks an in-place update (e.g. a decrement) that keeps the
/// entry's remaining lifetime.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

/// Per-entry expiration policy.
#[derive(Debug)]
struct EntryExpiry {
    default_ttl: Duration,
}

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl.unwrap_or(self.default_ttl))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl.or(duration_until_expiry)
    }
}

/// In-memory cache provider using moka.
///
/// Suitable for single-node deployments and tests. Entries honour the TTL
/// passed to [`CacheProvider::set`].
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry {
                default_ttl: Duration::from_secs(default_ttl_seconds),
            })
            .build();

        Self { cache }
    }

    fn parse_counter(key: &str, raw: &str) -> AppResult<i64> {
        raw.parse::<i64>()
            .map_err(|_| AppError::cache(format!("Value at '{key}' is not an integer")))
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl: Some(ttl),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let entry = Entry {
            value: value.to_string(),
            ttl: Some(ttl),
        };
        let slot = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async move { entry })
            .await;
        Ok(slot.is_fresh())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn decr(&self, key: &str) -> AppResult<i64> {
        let owned_key = key.to_string();
        let result = self
            .cache
            .entry(key.to_string())
            .and_try_compute_with(|existing| async move {
                let current = match existing {
                    Some(entry) => Self::parse_counter(&owned_key, &entry.into_value().value)?,
                    None => 0,
                };
                Ok::<_, AppError>(Op::Put(Entry {
                    value: (current - 1).to_string(),
                    ttl: None,
                }))
            })
            .await?;

        match result {
            CompResult::Inserted(entry) | CompResult::ReplacedWith(entry) => {
                Self::parse_counter(key, &entry.into_value().value)
            }
            _ => Err(AppError::cache(format!("Decrement of '{key}' had no effect"))),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
