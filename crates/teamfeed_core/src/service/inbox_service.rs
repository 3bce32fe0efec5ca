//! Notification inbox use-cases.
//!
//! # Responsibility
//! - Present a recipient's notifications with sender-resolved titles.
//! - Acknowledge (mark read) a single notification.

use crate::feed::filter::DirectoryIndex;
use crate::model::notification::{NotificationId, NotificationKind, NotificationRecord};
use crate::model::user::User;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoResult;
use log::info;

/// One inbox row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    pub notification: NotificationRecord,
    /// e.g. "Ada mentioned you".
    pub title: String,
    pub sender_photo_url: Option<String>,
}

/// Inbox facade over the notification port.
pub struct InboxService<N: NotificationRepository> {
    notifications: N,
}

impl<N: NotificationRepository> InboxService<N> {
    pub fn new(notifications: N) -> Self {
        Self { notifications }
    }

    /// Lists `user_id`'s notifications newest first.
    ///
    /// Senders missing from `directory` are shown by uid.
    pub fn inbox(&self, user_id: &str, directory: &[User]) -> RepoResult<Vec<InboxEntry>> {
        let index = DirectoryIndex::new(directory);
        let records = self.notifications.list_for_recipient(user_id)?;
        Ok(records
            .into_iter()
            .map(|notification| {
                let sender = index.get(notification.sender_id.as_str());
                let sender_name = sender
                    .map(|user| user.display_name.as_str())
                    .unwrap_or(notification.sender_id.as_str());
                InboxEntry {
                    title: notification_title(notification.kind, sender_name),
                    sender_photo_url: sender.and_then(|user| user.photo_url.clone()),
                    notification,
                }
            })
            .collect())
    }

    pub fn unread_count(&self, user_id: &str) -> RepoResult<usize> {
        Ok(self
            .notifications
            .list_for_recipient(user_id)?
            .iter()
            .filter(|record| !record.is_read)
            .count())
    }

    /// Marks one notification as read on behalf of its recipient.
    pub fn mark_read(&self, user_id: &str, notification_id: NotificationId) -> RepoResult<()> {
        self.notifications.mark_read(user_id, notification_id)?;
        info!("event=notification_read module=service status=ok notification_id={notification_id}");
        Ok(())
    }
}

/// Display title for one notification.
pub fn notification_title(kind: NotificationKind, sender_name: &str) -> String {
    match kind {
        NotificationKind::Mention => format!("{sender_name} mentioned you"),
    }
}
