//! Directory port and SQLite implementation.
//!
//! # Responsibility
//! - Serve read-only `User` snapshots to feed filtering and the inbox.
//! - Seed or refresh directory rows (`upsert_user`).
//!
//! # Invariants
//! - `list_users` is ordered by `display_name` (case-insensitive), then uid.
//! - Team ids are stored in string form.

use crate::model::user::{TeamId, User};
use crate::repo::{ensure_tables, RepoResult};
use rusqlite::{params, Connection};

/// Directory port.
pub trait UserRepository {
    /// Inserts or replaces one directory entry, expertise included.
    fn upsert_user(&self, user: &User) -> RepoResult<()>;
    /// Returns the full directory snapshot.
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed directory repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["users", "user_expertise"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn upsert_user(&self, user: &User) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO users (uid, display_name, photo_url, team_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(uid) DO UPDATE SET
                display_name = excluded.display_name,
                photo_url = excluded.photo_url,
                team_id = excluded.team_id;",
            params![
                user.uid.as_str(),
                user.display_name.as_str(),
                user.photo_url.as_deref(),
                user.team_id.as_ref().map(TeamId::as_str),
            ],
        )?;
        tx.execute(
            "DELETE FROM user_expertise WHERE user_uid = ?1;",
            [user.uid.as_str()],
        )?;
        for (position, expertise) in user.expertise.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO user_expertise (user_uid, position, expertise)
                 VALUES (?1, ?2, ?3);",
                params![user.uid.as_str(), position as i64, expertise.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT uid, display_name, photo_url, team_id
             FROM users
             ORDER BY display_name COLLATE NOCASE ASC, uid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            let uid: String = row.get("uid")?;
            let expertise = load_expertise(self.conn, &uid)?;
            users.push(User {
                display_name: row.get("display_name")?,
                photo_url: row.get("photo_url")?,
                team_id: row.get::<_, Option<String>>("team_id")?.map(TeamId::new),
                expertise,
                uid,
            });
        }
        Ok(users)
    }
}

fn load_expertise(conn: &Connection, uid: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT expertise
         FROM user_expertise
         WHERE user_uid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([uid])?;
    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        values.push(row.get(0)?);
    }
    Ok(values)
}
