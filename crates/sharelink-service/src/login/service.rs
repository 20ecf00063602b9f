//! Login link service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use sharelink_core::config::share::ShareConfig;
use sharelink_core::error::AppError;
use sharelink_core::traits::ResourceStore;
use sharelink_entity::share::{ShareCategory, ShareLink};
use sharelink_entity::user::User;

use crate::context::RequestContext;
use crate::share::ShareRegistry;

/// Issues one-time login links and signs users in with them.
#[derive(Debug, Clone)]
pub struct LoginShareService {
    registry: Arc<ShareRegistry>,
    users: Arc<dyn ResourceStore<User>>,
    window: Duration,
}

impl LoginShareService {
    /// Creates a new login link service.
    pub fn new(
        registry: Arc<ShareRegistry>,
        users: Arc<dyn ResourceStore<User>>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            registry,
            users,
            window: config.login_window(),
        }
    }

    /// Issues a login link for the caller.
    pub async fn create_login_link(&self, ctx: &RequestContext) -> Result<ShareLink, AppError> {
        let link = self
            .registry
            .issue(ShareCategory::Login, &ctx.user_id, self.window)
            .await?;
        info!(user_id = %ctx.user_id, "Login link created");
        Ok(link)
    }

    /// Signs in with a login link. The link is spent on first use.
    pub async fn login_by_link(&self, token: &str) -> Result<User, AppError> {
        let user_id = self
            .registry
            .check(ShareCategory::Login, token, self.window)
            .await?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::invalid_parameter(format!("User '{user_id}' no longer exists")))?;

        info!(user_id = %user.id, username = %user.username, "Logged in by link");
        Ok(user)
    }
}
