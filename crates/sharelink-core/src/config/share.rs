//! Share link configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Public URL and per-category window settings for share links.
///
/// Each window is both the redemption window checked against the
/// timestamp embedded in a token and the storage TTL used for count-bound
/// links of that category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Scheme and host prepended to public share paths.
    #[serde(default = "default_host_url")]
    pub host_url: String,
    /// Window for login links in seconds.
    #[serde(default = "default_login_window")]
    pub login_window_seconds: u64,
    /// Window for message links in seconds.
    #[serde(default = "default_message_window")]
    pub message_window_seconds: u64,
    /// Window for file links in seconds.
    #[serde(default = "default_file_window")]
    pub file_window_seconds: u64,
}

impl ShareConfig {
    /// Login link window.
    pub fn login_window(&self) -> Duration {
        Duration::from_secs(self.login_window_seconds)
    }

    /// Message link window.
    pub fn message_window(&self) -> Duration {
        Duration::from_secs(self.message_window_seconds)
    }

    /// File link window.
    pub fn file_window(&self) -> Duration {
        Duration::from_secs(self.file_window_seconds)
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            login_window_seconds: default_login_window(),
            message_window_seconds: default_message_window(),
            file_window_seconds: default_file_window(),
        }
    }
}

fn default_host_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_login_window() -> u64 {
    5 * 60
}

fn default_message_window() -> u64 {
    24 * 60 * 60
}

fn default_file_window() -> u64 {
    24 * 60 * 60
}
