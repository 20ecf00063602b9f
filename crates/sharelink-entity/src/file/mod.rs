//! Stored file entities.

pub mod model;

pub use model::{FileDownload, StoredFile};
