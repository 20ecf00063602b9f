//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ShareCategory;

/// A minted share link, as handed back to the user who created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    /// Kind of resource the link grants access to.
    pub category: ShareCategory,
    /// Opaque URL-safe token.
    pub token: String,
    /// Public path, `/<segment>/<token>`.
    pub path: String,
    /// Absolute URL (configured host followed by the path).
    pub url: String,
    /// When the embedded validity window closes.
    pub expires_at: DateTime<Utc>,
    /// Number of redemptions allowed, for count-bound links.
    pub max_uses: Option<u32>,
}
