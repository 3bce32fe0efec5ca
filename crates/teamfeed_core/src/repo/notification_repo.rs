//! Notification port and SQLite implementation.
//!
//! # Responsibility
//! - Persist one notification per dispatch request.
//! - Let a recipient list and acknowledge their notifications.
//!
//! # Invariants
//! - Every `dispatch` call is independent; there is no batch transaction.
//! - `mark_read` only affects notifications owned by the given recipient.
//! - Recipient listings are newest first (`created_at DESC, rowid DESC`).

use crate::model::notification::{
    NotificationDispatchRequest, NotificationId, NotificationKind, NotificationRecord,
};
use crate::repo::{ensure_tables, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Notification port consumed by mention dispatch and the inbox.
pub trait NotificationRepository {
    /// Records one notification and returns its id.
    fn dispatch(&self, request: &NotificationDispatchRequest) -> RepoResult<NotificationId>;
    fn mark_read(&self, user_id: &str, notification_id: NotificationId) -> RepoResult<()>;
    /// Lists a recipient's notifications, newest first.
    fn list_for_recipient(&self, user_id: &str) -> RepoResult<Vec<NotificationRecord>>;
}

/// SQLite-backed notification repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["notifications"])?;
        Ok(Self { conn })
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn dispatch(&self, request: &NotificationDispatchRequest) -> RepoResult<NotificationId> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO notifications (
                uuid,
                recipient_uid,
                sender_uid,
                post_uuid,
                content,
                kind
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                request.recipient_id.as_str(),
                request.sender_id.as_str(),
                request.post_id.to_string(),
                request.message_body.as_str(),
                request.kind.as_str(),
            ],
        )?;
        Ok(id)
    }

    fn mark_read(&self, user_id: &str, notification_id: NotificationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notifications
             SET is_read = 1
             WHERE uuid = ?1
               AND recipient_uid = ?2;",
            params![notification_id.to_string(), user_id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("notification", notification_id));
        }
        Ok(())
    }

    fn list_for_recipient(&self, user_id: &str) -> RepoResult<Vec<NotificationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                uuid,
                recipient_uid,
                sender_uid,
                post_uuid,
                content,
                kind,
                created_at,
                is_read
             FROM notifications
             WHERE recipient_uid = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_notification_row(row)?);
        }
        Ok(records)
    }
}

fn parse_notification_row(row: &Row<'_>) -> RepoResult<NotificationRecord> {
    let id_text: String = row.get("uuid")?;
    let post_text: String = row.get("post_uuid")?;
    let kind_text: String = row.get("kind")?;
    let kind = NotificationKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid notification kind `{kind_text}` in notifications.kind"
        ))
    })?;
    let is_read = match row.get::<_, i64>("is_read")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_read value `{other}` in notifications.is_read"
            )));
        }
    };

    Ok(NotificationRecord {
        id: parse_uuid(&id_text, "notifications.uuid")?,
        recipient_id: row.get("recipient_uid")?,
        sender_id: row.get("sender_uid")?,
        post_id: parse_uuid(&post_text, "notifications.post_uuid")?,
        content: row.get("content")?,
        kind,
        time: row.get("created_at")?,
        is_read,
    })
}
