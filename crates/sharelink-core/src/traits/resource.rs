//! Resource store contract for the records share links point at.

use async_trait::async_trait;

use crate::result::AppResult;

/// A record that belongs to a single user.
pub trait Owned {
    /// ID of the owning user.
    fn owner_id(&self) -> &str;
}

/// Read access to a collection of protected records (users, messages,
/// files).
///
/// Share links only ever carry a record's ID; the record itself is loaded
/// through this trait after a successful redemption.
#[async_trait]
pub trait ResourceStore<R>: Send + Sync + std::fmt::Debug + 'static
where
    R: Send + Sync + 'static,
{
    /// Find a record by ID. Returns `None` if it does not exist.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>>;
}
