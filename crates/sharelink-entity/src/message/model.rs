//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharelink_core::traits::Owned;

/// A private message posted by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: String,
    /// Author of the message.
    pub user_id: String,
    /// Message body.
    pub info: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Owned for Message {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
