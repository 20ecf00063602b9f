//! Namespaced cache access for share link records.

use std::sync::Arc;
use std::time::Duration;

use sharelink_cache::keys;
use sharelink_core::error::AppError;
use sharelink_core::result::AppResult;
use sharelink_core::traits::cache::CacheProvider;
use sharelink_entity::share::ShareCategory;

/// Typed access to the cache entries behind a share link.
///
/// A link is backed by a value entry in its category namespace and, for
/// count-bound links, a `count-<token>` entry holding the remaining uses.
/// Every method is a single independent cache operation.
#[derive(Debug, Clone)]
pub struct RedemptionStore {
    cache: Arc<dyn CacheProvider>,
}

impl RedemptionStore {
    /// Creates a store over the given cache.
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self { cache }
    }

    /// Stores the protected value of a link with an expiration.
    pub async fn put(
        &self,
        category: ShareCategory,
        token: &str,
        value: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        self.cache
            .set(&keys::share_value(category, token), value, ttl)
            .await
    }

    /// Stores the remaining-uses counter of a link.
    pub async fn put_count(&self, token: &str, uses: u32, ttl: Duration) -> AppResult<()> {
        self.cache
            .set(&keys::share_count(token), &uses.to_string(), ttl)
            .await
    }

    /// Reads the protected value of a link without removing it.
    ///
    /// An empty stored value counts as absent.
    pub async fn take(&self, category: ShareCategory, token: &str) -> AppResult<Option<String>> {
        let value = self.cache.get(&keys::share_value(category, token)).await?;
        Ok(value.filter(|v| !v.is_empty()))
    }

    /// Reads the remaining-uses counter. `None` means the link is
    /// duration-only.
    pub async fn count(&self, token: &str) -> AppResult<Option<i64>> {
        let key = keys::share_count(token);
        match self.cache.get(&key).await? {
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| AppError::cache(format!("Counter '{key}' is not an integer"))),
            None => Ok(None),
        }
    }

    /// Decrements the remaining-uses counter and returns the new value.
    pub async fn decrement(&self, token: &str) -> AppResult<i64> {
        self.cache.decr(&keys::share_count(token)).await
    }

    /// Claims `token` for a new link in any category.
    ///
    /// Returns `false` if another link already holds it. The claim lives as
    /// long as the link's window.
    pub async fn reserve(&self, token: &str, ttl: Duration) -> AppResult<bool> {
        self.cache
            .set_nx(&keys::share_mint(token), "1", ttl)
            .await
    }

    /// Removes the protected value of a link.
    pub async fn delete(&self, category: ShareCategory, token: &str) -> AppResult<()> {
        self.cache.delete(&keys::share_value(category, token)).await
    }

    /// Removes the remaining-uses counter of a link.
    pub async fn delete_count(&self, token: &str) -> AppResult<()> {
        self.cache.delete(&keys::share_count(token)).await
    }
}
