//! Link issuance commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sharelink_core::error::AppError;
use sharelink_entity::share::{ShareCategory, ShareLink};

use super::Runtime;
use crate::output::{self, OutputFormat};

/// Arguments for `issue`
#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Category of the shared value (login, message, file)
    #[arg(short = 't', long)]
    pub category: ShareCategory,
    /// Value the link resolves to
    pub value: String,
    /// Window in seconds (defaults to the category window)
    #[arg(short, long)]
    pub window: Option<u64>,
}

/// Arguments for `issue-count`
#[derive(Debug, Args)]
pub struct IssueCountArgs {
    /// Category of the shared value (message, file)
    #[arg(short = 't', long)]
    pub category: ShareCategory,
    /// Value the link resolves to
    pub value: String,
    /// Number of redemptions allowed
    #[arg(short, long)]
    pub uses: u32,
    /// Window in seconds (defaults to the category window)
    #[arg(short, long)]
    pub window: Option<u64>,
}

/// Link display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Category
    category: String,
    /// Token
    token: String,
    /// Public URL
    url: String,
    /// Expiry
    expires_at: String,
    /// Allowed uses
    max_uses: String,
}

impl From<ShareLink> for LinkRow {
    fn from(link: ShareLink) -> Self {
        Self {
            category: link.category.to_string(),
            token: link.token,
            url: link.url,
            expires_at: link.expires_at.to_rfc3339(),
            max_uses: link
                .max_uses
                .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
        }
    }
}

/// Execute `issue`
pub async fn execute(
    args: &IssueArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let window = runtime.window(args.category, args.window);
    let link = runtime
        .registry
        .issue(args.category, &args.value, window)
        .await?;
    output::print_rows(&[LinkRow::from(link)], format);
    Ok(())
}

/// Execute `issue-count`
pub async fn execute_count(
    args: &IssueCountArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let window = runtime.window(args.category, args.window);
    let link = runtime
        .registry
        .issue_with_count(args.category, &args.value, window, args.uses)
        .await?;
    output::print_rows(&[LinkRow::from(link)], format);
    Ok(())
}
