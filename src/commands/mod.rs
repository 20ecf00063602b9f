//! CLI command definitions and dispatch.

pub mod health;
pub mod inspect;
pub mod issue;
pub mod redeem;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use sharelink_cache::CacheManager;
use sharelink_core::config::AppConfig;
use sharelink_core::error::AppError;
use sharelink_core::traits::CacheProvider;
use sharelink_entity::share::ShareCategory;
use sharelink_service::ShareRegistry;
use sharelink_token::TokenCodec;

use crate::output::OutputFormat;

/// ShareLink: time- and count-bound share links
#[derive(Debug, Parser)]
#[command(name = "sharelink", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to $SHARELINK_CONFIG or config/default)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue a duration-bound link
    Issue(issue::IssueArgs),
    /// Issue a link limited to a number of uses
    IssueCount(issue::IssueCountArgs),
    /// Redeem a link once and invalidate it
    Check(redeem::RedeemArgs),
    /// Redeem a link, spending one use if it is count-bound
    Consume(redeem::RedeemArgs),
    /// Show what a token carries without redeeming it
    Inspect(inspect::InspectArgs),
    /// Check that the cache backend is reachable
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let runtime = Runtime::build(config).await?;
        match &self.command {
            Commands::Issue(args) => issue::execute(args, &runtime, self.format).await,
            Commands::IssueCount(args) => issue::execute_count(args, &runtime, self.format).await,
            Commands::Check(args) => redeem::check(args, &runtime, self.format).await,
            Commands::Consume(args) => redeem::consume(args, &runtime, self.format).await,
            Commands::Inspect(args) => inspect::execute(args, &runtime, self.format).await,
            Commands::Health => health::execute(&runtime).await,
        }
    }
}

/// Components shared by every command, built once from configuration.
#[derive(Debug)]
pub struct Runtime {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Configured cache backend.
    pub cache: Arc<dyn CacheProvider>,
    /// Token codec.
    pub codec: Arc<TokenCodec>,
    /// Share registry over the cache.
    pub registry: ShareRegistry,
}

impl Runtime {
    async fn build(config: &AppConfig) -> Result<Self, AppError> {
        let cache: Arc<dyn CacheProvider> = Arc::new(CacheManager::new(&config.cache).await?);
        let codec = Arc::new(TokenCodec::new(&config.cipher)?);
        let registry = ShareRegistry::new(codec.clone(), cache.clone(), &config.share.host_url);

        Ok(Self {
            config: config.clone(),
            cache,
            codec,
            registry,
        })
    }

    /// Configured window for a category, or `override_secs` when given.
    pub fn window(&self, category: ShareCategory, override_secs: Option<u64>) -> Duration {
        if let Some(secs) = override_secs {
            return Duration::from_secs(secs);
        }
        match category {
            ShareCategory::Login => self.config.share.login_window(),
            ShareCategory::Message => self.config.share.message_window(),
            ShareCategory::File => self.config.share.file_window(),
        }
    }
}

/// Resolve a token and its category from either a bare token or a share
/// path/URL such as `http://host/ms/<token>`.
pub fn resolve_link(
    link: &str,
    category: Option<ShareCategory>,
) -> Result<(ShareCategory, String), AppError> {
    let mut segments = link.trim_end_matches('/').rsplit('/');
    let token = segments.next().unwrap_or_default();
    let from_path = segments.next().and_then(ShareCategory::from_path_segment);

    let resolved = match (from_path, category) {
        (Some(path), Some(given)) if path != given => {
            return Err(AppError::invalid_parameter(format!(
                "link is a {path} link, not a {given} link"
            )));
        }
        (Some(c), _) | (None, Some(c)) => c,
        (None, None) => {
            return Err(AppError::invalid_parameter(
                "category is required for a bare token",
            ));
        }
    };

    if token.is_empty() {
        return Err(AppError::invalid_parameter("empty share token"));
    }
    Ok((resolved, token.to_string()))
}
