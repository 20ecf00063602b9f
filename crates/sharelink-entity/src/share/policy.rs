//! Expiry policies for share links.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long, and how often, a share link may be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Valid until `mint_time + window`.
    Duration {
        /// Validity window.
        window: Duration,
    },
    /// Valid until `mint_time + window` and while uses remain.
    Count {
        /// Validity window.
        window: Duration,
        /// Number of redemptions allowed.
        max_uses: u32,
    },
}

impl ExpiryPolicy {
    /// Validity window of the policy.
    pub fn window(&self) -> Duration {
        match self {
            Self::Duration { window } | Self::Count { window, .. } => *window,
        }
    }

    /// Maximum number of uses, if the policy is count-bound.
    pub fn max_uses(&self) -> Option<u32> {
        match self {
            Self::Duration { .. } => None,
            Self::Count { max_uses, .. } => Some(*max_uses),
        }
    }
}
