//! Stored file entity model.

use serde::{Deserialize, Serialize};

use sharelink_core::traits::Owned;

/// A file uploaded by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    /// Unique file identifier.
    pub id: String,
    /// Uploader.
    pub user_id: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// Location of the stored bytes.
    pub location: String,
}

impl Owned for StoredFile {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

/// What a redeemed file link resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDownload {
    /// Location of the stored bytes.
    pub location: String,
    /// File name to present to the downloader.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
}

impl From<StoredFile> for FileDownload {
    fn from(file: StoredFile) -> Self {
        Self {
            location: file.location,
            name: file.name,
            size: file.size,
        }
    }
}
