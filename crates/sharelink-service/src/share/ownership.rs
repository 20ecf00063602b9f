//! Ownership gate applied before a resource is shared.

use sharelink_core::error::AppError;
use sharelink_core::traits::{Owned, ResourceStore};

use crate::context::RequestContext;

/// Loads `id` from `store` and checks that the caller owns it.
///
/// A missing record is reported as an invalid parameter, since the ID came
/// from the caller.
pub(crate) async fn load_owned<R>(
    ctx: &RequestContext,
    store: &dyn ResourceStore<R>,
    kind: &str,
    id: &str,
) -> Result<R, AppError>
where
    R: Owned + Send + Sync + 'static,
{
    let record = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::invalid_parameter(format!("{kind} '{id}' does not exist")))?;

    if record.owner_id() != ctx.user_id {
        return Err(AppError::forbidden(format!(
            "{kind} '{id}' is not owned by the caller"
        )));
    }

    Ok(record)
}
