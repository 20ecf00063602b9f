//! Cache health command.

use sharelink_core::error::AppError;

use super::Runtime;
use crate::output;

/// Execute `health`
pub async fn execute(runtime: &Runtime) -> Result<(), AppError> {
    if runtime.cache.health_check().await? {
        output::print_success(&format!(
            "Cache '{}' is reachable",
            runtime.config.cache.provider
        ));
        Ok(())
    } else {
        Err(AppError::cache(format!(
            "Cache '{}' did not answer",
            runtime.config.cache.provider
        )))
    }
}
