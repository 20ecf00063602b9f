//! Shared fixtures for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sharelink_cache::memory::MemoryCacheProvider;
use sharelink_core::config::cache::MemoryCacheConfig;
use sharelink_core::config::cipher::CipherConfig;
use sharelink_core::error::AppError;
use sharelink_core::result::AppResult;
use sharelink_core::traits::{CacheProvider, ResourceStore};
use sharelink_token::TokenCodec;

use crate::share::ShareRegistry;

pub(crate) fn memory_cache() -> Arc<dyn CacheProvider> {
    Arc::new(MemoryCacheProvider::new(
        &MemoryCacheConfig { max_capacity: 1000 },
        60,
    ))
}

pub(crate) fn codec() -> Arc<TokenCodec> {
    Arc::new(
        TokenCodec::new(&CipherConfig {
            key: "0123456789abcdef0123456789abcdef".to_string(),
            iv: "fedcba9876543210".to_string(),
        })
        .unwrap(),
    )
}

pub(crate) fn registry(cache: Arc<dyn CacheProvider>) -> ShareRegistry {
    ShareRegistry::new(codec(), cache, "http://share.test/")
}

/// In-memory resource store keyed by ID.
#[derive(Debug)]
pub(crate) struct MemoryResources<R> {
    records: Mutex<HashMap<String, R>>,
}

impl<R: Clone> MemoryResources<R> {
    pub(crate) fn new(records: impl IntoIterator<Item = (String, R)>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
        }
    }

    pub(crate) fn remove(&self, id: &str) {
        self.records.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl<R> ResourceStore<R> for MemoryResources<R>
where
    R: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }
}

/// Memory cache whose operations can be made to fail on demand.
#[derive(Debug)]
pub(crate) struct FlakyCache {
    inner: MemoryCacheProvider,
    fail_set_prefix: Mutex<Option<&'static str>>,
    written: Mutex<Vec<String>>,
    fail_get: AtomicBool,
    fail_delete: AtomicBool,
    fail_decr: AtomicBool,
}

impl FlakyCache {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 }, 60),
            fail_set_prefix: Mutex::new(None),
            written: Mutex::new(Vec::new()),
            fail_get: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_decr: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_sets_with_prefix(&self, prefix: &'static str) {
        *self.fail_set_prefix.lock().unwrap() = Some(prefix);
    }

    pub(crate) fn fail_gets(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_decrs(&self, fail: bool) {
        self.fail_decr.store(fail, Ordering::SeqCst);
    }

    /// Number of live entries written under `prefix`.
    pub(crate) async fn entries_with_prefix(&self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .written
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        let mut live = 0;
        for key in keys {
            if self.inner.exists(&key).await.unwrap() {
                live += 1;
            }
        }
        live
    }

    fn injected(op: &str) -> AppError {
        AppError::cache(format!("injected {op} failure"))
    }
}

#[async_trait]
impl CacheProvider for FlakyCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::injected("get"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let prefix = *self.fail_set_prefix.lock().unwrap();
        if prefix.is_some_and(|p| key.starts_with(p)) {
            return Err(Self::injected("set"));
        }
        self.written.lock().unwrap().push(key.to_string());
        self.inner.set(key, value, ttl).await
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let prefix = *self.fail_set_prefix.lock().unwrap();
        if prefix.is_some_and(|p| key.starts_with(p)) {
            return Err(Self::injected("set_nx"));
        }
        let created = self.inner.set_nx(key, value, ttl).await?;
        if created {
            self.written.lock().unwrap().push(key.to_string());
        }
        Ok(created)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected("delete"));
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn decr(&self, key: &str) -> AppResult<i64> {
        if self.fail_decr.load(Ordering::SeqCst) {
            return Err(Self::injected("decr"));
        }
        self.inner.decr(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.fail_get.load(Ordering::SeqCst))
    }
}
