//! Message share service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use sharelink_core::config::share::ShareConfig;
use sharelink_core::error::AppError;
use sharelink_core::traits::ResourceStore;
use sharelink_entity::message::Message;
use sharelink_entity::share::{ShareCategory, ShareLink, ShareRequest};

use crate::context::RequestContext;
use crate::share::ShareRegistry;
use crate::share::ownership::load_owned;

/// Shares messages through links and reads them back.
#[derive(Debug, Clone)]
pub struct MessageShareService {
    /// Share registry.
    registry: Arc<ShareRegistry>,
    /// Message records.
    messages: Arc<dyn ResourceStore<Message>>,
    /// Longest lifetime of a message link.
    window: Duration,
}

impl MessageShareService {
    /// Creates a new message share service.
    pub fn new(
        registry: Arc<ShareRegistry>,
        messages: Arc<dyn ResourceStore<Message>>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            registry,
            messages,
            window: config.message_window(),
        }
    }

    /// Issues a link to one of the caller's messages.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        message_id: &str,
        request: ShareRequest,
    ) -> Result<ShareLink, AppError> {
        let message = load_owned(ctx, self.messages.as_ref(), "message", message_id).await?;
        let policy = request.into_policy(self.window)?;

        let link = self
            .registry
            .issue_with_policy(ShareCategory::Message, &message.id, policy)
            .await?;

        info!(user_id = %ctx.user_id, message_id = %message.id, "Message shared");
        Ok(link)
    }

    /// Redeems a message link and returns the message text.
    pub async fn read_shared(&self, token: &str) -> Result<String, AppError> {
        let message_id = self
            .registry
            .consume(ShareCategory::Message, token, self.window)
            .await?;

        let message = self
            .messages
            .find_by_id(&message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message '{message_id}' not found")))?;

        Ok(message.info)
    }
}
