//! Caller-facing share parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use sharelink_core::error::AppError;

use super::ExpiryPolicy;

/// How the `expire` value of a [`ShareRequest`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpireType {
    /// `expire` is a number of redemptions.
    Times,
    /// `expire` is a number of minutes.
    Duration,
}

/// Parameters supplied by a user sharing one of their resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// Interpretation of `expire`.
    pub expire_type: ExpireType,
    /// Minutes or uses, depending on `expire_type`.
    pub expire: i64,
}

impl ShareRequest {
    /// A duration-bound request of `minutes` minutes.
    pub fn minutes(minutes: i64) -> Self {
        Self {
            expire_type: ExpireType::Duration,
            expire: minutes,
        }
    }

    /// A count-bound request allowing `uses` redemptions.
    pub fn times(uses: i64) -> Self {
        Self {
            expire_type: ExpireType::Times,
            expire: uses,
        }
    }

    /// Turn the request into an expiry policy for a category whose
    /// redemption window is `category_window`.
    ///
    /// Count-bound links live for the whole category window. A duration
    /// longer than the category window is rejected because redemption
    /// would refuse the link before its stated expiry.
    pub fn into_policy(self, category_window: Duration) -> Result<ExpiryPolicy, AppError> {
        if self.expire < 1 {
            return Err(AppError::invalid_parameter(format!(
                "expire must be positive, got {}",
                self.expire
            )));
        }

        match self.expire_type {
            ExpireType::Duration => {
                let minutes = u64::try_from(self.expire)
                    .map_err(|_| AppError::invalid_parameter("expire out of range"))?;
                let window = Duration::from_secs(minutes.saturating_mul(60));
                if window > category_window {
                    return Err(AppError::invalid_parameter(format!(
                        "expire of {minutes} minutes exceeds the {}s maximum",
                        category_window.as_secs()
                    )));
                }
                Ok(ExpiryPolicy::Duration { window })
            }
            ExpireType::Times => {
                let max_uses = u32::try_from(self.expire)
                    .map_err(|_| AppError::invalid_parameter("expire out of range"))?;
                Ok(ExpiryPolicy::Count {
                    window: category_window,
                    max_uses,
                })
            }
        }
    }
}
