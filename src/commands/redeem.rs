//! Link redemption commands.

use clap::Args;

use sharelink_core::error::AppError;
use sharelink_entity::share::ShareCategory;

use super::{Runtime, resolve_link};
use crate::output::{self, OutputFormat};

/// Arguments for `check` and `consume`
#[derive(Debug, Args)]
pub struct RedeemArgs {
    /// Token, share path (`/ms/<token>`) or full share URL
    pub link: String,
    /// Category, required for a bare token
    #[arg(short = 't', long)]
    pub category: Option<ShareCategory>,
    /// Window in seconds (defaults to the category window)
    #[arg(short, long)]
    pub window: Option<u64>,
}

/// Execute `check`: single-use redemption
pub async fn check(
    args: &RedeemArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (category, token) = resolve_link(&args.link, args.category)?;
    let window = runtime.window(category, args.window);
    let value = runtime.registry.check(category, &token, window).await?;
    output::print_value(&value, format);
    Ok(())
}

/// Execute `consume`: count-aware redemption
pub async fn consume(
    args: &RedeemArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (category, token) = resolve_link(&args.link, args.category)?;
    let window = runtime.window(category, args.window);
    let value = runtime.registry.consume(category, &token, window).await?;
    output::print_value(&value, format);
    Ok(())
}
