//! Share registry: mints share links and redeems them.
//!
//! A token carries its own mint instant, so the validity window is checked
//! locally before any cache access. The cache holds the protected value
//! (and, for count-bound links, the remaining uses) with a TTL matching the
//! link's window.
//!
//! Minting and consuming are each a sequence of independent cache
//! operations with no transaction around them. Concurrent redemptions of the same count-bound link can therefore
//! over-redeem; they never reject the last legitimate use.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use sharelink_core::error::{AppError, ErrorKind};
use sharelink_core::result::AppResult;
use sharelink_core::traits::cache::CacheProvider;
use sharelink_entity::share::{ExpiryPolicy, ShareCategory, ShareLink};
use sharelink_token::{TokenCodec, public_path};

use super::store::RedemptionStore;

/// Issues and redeems share links.
#[derive(Debug, Clone)]
pub struct ShareRegistry {
    /// Sealed-timestamp codec built from the cipher configuration.
    codec: Arc<TokenCodec>,
    /// Cache-backed link records.
    store: RedemptionStore,
    /// Scheme and host prepended to public paths.
    host_url: String,
    /// Millisecond of the latest mint in this process. Shared by clones.
    last_minted_ms: Arc<AtomicI64>,
}

impl ShareRegistry {
    /// Creates a new share registry.
    pub fn new(
        codec: Arc<TokenCodec>,
        cache: Arc<dyn CacheProvider>,
        host_url: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            store: RedemptionStore::new(cache),
            host_url: host_url.into().trim_end_matches('/').to_string(),
            last_minted_ms: Arc::new(AtomicI64::new(i64::MIN)),
        }
    }

    /// Issues a duration-bound link for `value`.
    pub async fn issue(
        &self,
        category: ShareCategory,
        value: &str,
        window: Duration,
    ) -> AppResult<ShareLink> {
        self.issue_with_policy(category, value, ExpiryPolicy::Duration { window })
            .await
    }

    /// Issues a link for `value` that can be redeemed `max_uses` times
    /// within `window`.
    pub async fn issue_with_count(
        &self,
        category: ShareCategory,
        value: &str,
        window: Duration,
        max_uses: u32,
    ) -> AppResult<ShareLink> {
        self.issue_with_policy(category, value, ExpiryPolicy::Count { window, max_uses })
            .await
    }

    /// Issues a link for `value` under `policy`.
    ///
    /// A cache failure leaves the value unshared; writes that already
    /// completed are not rolled back.
    pub async fn issue_with_policy(
        &self,
        category: ShareCategory,
        value: &str,
        policy: ExpiryPolicy,
    ) -> AppResult<ShareLink> {
        if value.is_empty() {
            return Err(AppError::invalid_parameter("cannot share an empty value"));
        }
        let window = policy.window();
        if window.is_zero() {
            return Err(AppError::invalid_parameter("share window must be positive"));
        }
        if let ExpiryPolicy::Count { max_uses, .. } = policy {
            if !category.supports_count() {
                return Err(AppError::invalid_parameter(format!(
                    "{category} links cannot be count-bound"
                )));
            }
            if max_uses == 0 {
                return Err(AppError::invalid_parameter("max_uses must be positive"));
            }
        }

        let (token, expires_at) = self.mint_unused(window).await?;

        self.store
            .put(category, &token, value, window)
            .await
            .map_err(|e| internal("Failed to store share value", e))?;

        if let ExpiryPolicy::Count { max_uses, .. } = policy {
            self.store
                .put_count(&token, max_uses, window)
                .await
                .map_err(|e| internal("Failed to store share counter", e))?;
        }

        let path = public_path(category, &token);
        info!(
            category = %category,
            token = %token,
            max_uses = ?policy.max_uses(),
            window_secs = window.as_secs(),
            "Share link issued"
        );

        Ok(ShareLink {
            category,
            url: format!("{}{path}", self.host_url),
            path,
            expires_at,
            max_uses: policy.max_uses(),
            token,
        })
    }

    /// Checks the time window embedded in `token` against the current
    /// instant and returns the mint instant.
    pub fn validate_window(&self, token: &str, window: Duration) -> AppResult<DateTime<Utc>> {
        self.validate_window_at(token, window, Utc::now())
    }

    /// Checks the time window embedded in `token` against `now`.
    ///
    /// The token is valid from its mint instant up to, but excluding,
    /// `mint + window`. No cache access happens here.
    pub fn validate_window_at(
        &self,
        token: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<DateTime<Utc>> {
        if token.is_empty() {
            return Err(AppError::invalid_parameter("empty share token"));
        }

        let minted_at = self.codec.open(token).map_err(|e| {
            warn!(token = %token, error = %e, "Share token failed to decode");
            AppError::invalid_parameter(format!("share token failed to decode: {e}"))
        })?;

        let expires_at = expiry_of(minted_at, window)?;
        if now >= expires_at {
            info!(token = %token, expired_at = %expires_at.to_rfc3339(), "Share link expired");
            return Err(AppError::invalid_parameter(format!(
                "share link expired at {}",
                expires_at.to_rfc3339()
            )));
        }

        Ok(minted_at)
    }

    /// Redeems `token` once and invalidates it.
    ///
    /// Whatever the policy, a successful check deletes the value entry, so
    /// the link is single-use on this path.
    pub async fn check(
        &self,
        category: ShareCategory,
        token: &str,
        window: Duration,
    ) -> AppResult<String> {
        self.validate_window(token, window)?;
        let value = self.lookup(category, token).await?;

        self.store
            .delete(category, token)
            .await
            .map_err(|e| internal("Failed to invalidate share link", e))?;

        debug!(category = %category, token = %token, "Share link checked and invalidated");
        Ok(value)
    }

    /// Redeems `token`, honouring its use counter.
    ///
    /// Duration-only links are left untouched and stay redeemable until
    /// they expire. Count-bound links are decremented and removed once the
    /// last use is spent. Counter bookkeeping failures are logged and do
    /// not deny the redemption.
    pub async fn consume(
        &self,
        category: ShareCategory,
        token: &str,
        window: Duration,
    ) -> AppResult<String> {
        self.validate_window(token, window)?;
        let value = self.lookup(category, token).await?;

        match self.store.count(token).await {
            Ok(None) => return Ok(value),
            Ok(Some(remaining)) if remaining <= 0 => {
                info!(category = %category, token = %token, "Share link already exhausted");
                self.cleanup(category, token).await;
                return Err(AppError::invalid_parameter("share link exhausted"));
            }
            Ok(Some(_)) => {}
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to read share counter");
                return Ok(value);
            }
        }

        match self.store.decrement(token).await {
            Ok(remaining) if remaining <= 0 => {
                debug!(category = %category, token = %token, "Last use spent, cleaning up share link");
                self.cleanup(category, token).await;
            }
            Ok(remaining) => {
                debug!(category = %category, token = %token, remaining, "Share link consumed");
            }
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to decrement share counter");
            }
        }

        Ok(value)
    }

    /// Mints a token no other live link holds and returns it with its
    /// expiry.
    ///
    /// Tokens are a function of the mint millisecond, so each mint starts
    /// after the previous one in this process and claims its token in the
    /// cache. A claim held by another process moves the mint one
    /// millisecond forward.
    async fn mint_unused(&self, window: Duration) -> AppResult<(String, DateTime<Utc>)> {
        let mut millis = self.next_mint_ms(Utc::now().timestamp_millis());
        loop {
            let minted_at = DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| AppError::internal("mint instant out of range"))?;
            let expires_at = expiry_of(minted_at, window)?;
            let token = self.codec.mint(minted_at);

            let claimed = self
                .store
                .reserve(&token, window)
                .await
                .map_err(|e| internal("Failed to reserve share token", e))?;
            if claimed {
                return Ok((token, expires_at));
            }
            debug!(token = %token, "Share token already in use, retrying");
            millis = self.next_mint_ms(millis.saturating_add(1));
        }
    }

    /// Returns the first millisecond at or after `floor` that has not been
    /// handed out by this registry, and records it.
    fn next_mint_ms(&self, floor: i64) -> i64 {
        let previous = self
            .last_minted_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(floor.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        floor.max(previous.saturating_add(1))
    }

    async fn lookup(&self, category: ShareCategory, token: &str) -> AppResult<String> {
        let value = self
            .store
            .take(category, token)
            .await
            .map_err(|e| internal("Failed to read share link", e))?;

        value.ok_or_else(|| {
            info!(category = %category, token = %token, "Share link not matched");
            AppError::invalid_parameter("share link not matched")
        })
    }

    async fn cleanup(&self, category: ShareCategory, token: &str) {
        if let Err(e) = self.store.delete(category, token).await {
            warn!(token = %token, error = %e, "Failed to delete share value");
        }
        if let Err(e) = self.store.delete_count(token).await {
            warn!(token = %token, error = %e, "Failed to delete share counter");
        }
    }
}

fn expiry_of(minted_at: DateTime<Utc>, window: Duration) -> AppResult<DateTime<Utc>> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|w| minted_at.checked_add_signed(w))
        .ok_or_else(|| AppError::invalid_parameter("share window out of range"))
}

fn internal(context: &str, err: AppError) -> AppError {
    warn!(error = %err, "{context}");
    AppError::with_source(
        ErrorKind::Internal,
        format!("{context}: {}", err.message),
        err,
    )
}
