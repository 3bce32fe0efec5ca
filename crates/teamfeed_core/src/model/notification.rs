//! Notification domain model.
//!
//! # Responsibility
//! - Define the dispatch request handed to the notification port.
//! - Define the stored notification record read back by the inbox.
//!
//! # Invariants
//! - Within one dispatch batch no two requests share `(recipient_id, post_id)`.

use crate::model::post::PostId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a stored notification.
pub type NotificationId = Uuid;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Recipient was `@`-mentioned in a post.
    Mention,
}

impl NotificationKind {
    /// Stable string id used by storage adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mention => "mention",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mention" => Some(Self::Mention),
            _ => None,
        }
    }
}

/// One notification to deliver, produced by the mention batch builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDispatchRequest {
    pub recipient_id: UserId,
    pub sender_id: UserId,
    pub post_id: PostId,
    pub message_body: String,
    pub kind: NotificationKind,
}

/// Stored notification as returned by the notification port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub sender_id: UserId,
    pub post_id: PostId,
    pub content: String,
    pub kind: NotificationKind,
    /// Unix epoch milliseconds.
    pub time: i64,
    pub is_read: bool,
}
