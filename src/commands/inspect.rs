//! Token inspection command.

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use sharelink_core::error::AppError;
use sharelink_entity::share::ShareCategory;
use sharelink_service::RedemptionStore;

use super::{Runtime, resolve_link};
use crate::output::{self, OutputFormat};

/// Arguments for `inspect`
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Token, share path (`/ms/<token>`) or full share URL
    pub link: String,
    /// Category, required for a bare token
    #[arg(short = 't', long)]
    pub category: Option<ShareCategory>,
    /// Window in seconds (defaults to the category window)
    #[arg(short, long)]
    pub window: Option<u64>,
}

/// Inspection report row
#[derive(Debug, Serialize, Tabled)]
struct InspectRow {
    /// Category
    category: String,
    /// Minted at
    minted_at: String,
    /// Expires at
    expires_at: String,
    /// Window status
    status: String,
    /// Whether the value entry is present
    stored: bool,
    /// Remaining uses
    remaining: String,
}

/// Execute `inspect`. Reads state only; nothing is redeemed.
pub async fn execute(
    args: &InspectArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (category, token) = resolve_link(&args.link, args.category)?;
    let window = runtime.window(category, args.window);

    let (minted_at, expires_at, status) = match runtime.codec.open(&token) {
        Ok(minted) => {
            let expires = chrono::Duration::from_std(window)
                .ok()
                .and_then(|w| minted.checked_add_signed(w));
            let status = match expires {
                Some(at) if Utc::now() < at => "active".to_string(),
                _ => "expired".to_string(),
            };
            (
                minted.to_rfc3339(),
                expires.map_or_else(|| "-".to_string(), |at| at.to_rfc3339()),
                status,
            )
        }
        Err(e) => ("-".to_string(), "-".to_string(), format!("undecodable: {e}")),
    };

    let store = RedemptionStore::new(runtime.cache.clone());
    let stored = store.take(category, &token).await?.is_some();
    let remaining = store
        .count(&token)
        .await?
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

    output::print_rows(
        &[InspectRow {
            category: category.to_string(),
            minted_at,
            expires_at,
            status,
            stored,
            remaining,
        }],
        format,
    );
    Ok(())
}
