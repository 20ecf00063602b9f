//! File share service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use sharelink_core::config::share::ShareConfig;
use sharelink_core::error::AppError;
use sharelink_core::traits::ResourceStore;
use sharelink_entity::file::{FileDownload, StoredFile};
use sharelink_entity::share::{ShareCategory, ShareLink, ShareRequest};

use crate::context::RequestContext;
use crate::share::ShareRegistry;
use crate::share::ownership::load_owned;

/// Shares stored files through links and resolves downloads.
#[derive(Debug, Clone)]
pub struct FileShareService {
    registry: Arc<ShareRegistry>,
    files: Arc<dyn ResourceStore<StoredFile>>,
    window: Duration,
}

impl FileShareService {
    /// Creates a new file share service.
    pub fn new(
        registry: Arc<ShareRegistry>,
        files: Arc<dyn ResourceStore<StoredFile>>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            registry,
            files,
            window: config.file_window(),
        }
    }

    /// Issues a link to one of the caller's files.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        file_id: &str,
        request: ShareRequest,
    ) -> Result<ShareLink, AppError> {
        let file = load_owned(ctx, self.files.as_ref(), "file", file_id).await?;
        let policy = request.into_policy(self.window)?;

        let link = self
            .registry
            .issue_with_policy(ShareCategory::File, &file.id, policy)
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, name = %file.name, "File shared");
        Ok(link)
    }

    /// Redeems a file link and returns what is needed to stream the file.
    pub async fn read_shared(&self, token: &str) -> Result<FileDownload, AppError> {
        let file_id = self
            .registry
            .consume(ShareCategory::File, token, self.window)
            .await?;

        self.files
            .find_by_id(&file_id)
            .await?
            .map(FileDownload::from)
            .ok_or_else(|| AppError::not_found(format!("File '{file_id}' not found")))
    }
}
