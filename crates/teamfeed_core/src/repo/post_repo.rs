//! Persistence port for posts and comments.
//!
//! # Responsibility
//! - Assign post identity and timestamp on `create_post`.
//! - Record comments and keep the per-post comment counter in step.
//!
//! # Invariants
//! - Drafts are validated/normalized before insert.
//! - Tag order is preserved through storage via `post_tags.position`.
//! - `add_comment` inserts the comment and bumps `num_comments` atomically.
//! - Feed listing is newest first: `created_at DESC`, then insertion order
//!   reversed (`rowid DESC`) for posts written in the same millisecond.

use crate::model::post::{Post, PostDraft, PostId};
use crate::repo::{ensure_tables, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const POST_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    author_uid,
    created_at,
    num_comments
FROM posts";

/// Persistence port consumed by the publish and feed services.
pub trait PostRepository {
    /// Stores a new post and returns its freshly assigned id.
    fn create_post(&self, draft: &PostDraft) -> RepoResult<PostId>;
    /// Stores one comment and increments the post's comment counter.
    fn add_comment(&self, user_id: &str, post_id: PostId, text: &str) -> RepoResult<()>;
    fn get_post(&self, post_id: PostId) -> RepoResult<Option<Post>>;
    /// Returns every post, newest first.
    fn list_posts(&self) -> RepoResult<Vec<Post>>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Builds a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["posts", "post_tags", "comments"])?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, draft: &PostDraft) -> RepoResult<PostId> {
        let draft = draft.normalized()?;
        let post_id = Uuid::new_v4();
        let post_id_text = post_id.to_string();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO posts (uuid, title, description, author_uid)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post_id_text.as_str(),
                draft.title.as_str(),
                draft.description.as_str(),
                draft.author.as_str(),
            ],
        )?;
        for (position, tag) in draft.tags.iter().enumerate() {
            tx.execute(
                "INSERT INTO post_tags (post_uuid, position, tag) VALUES (?1, ?2, ?3);",
                params![post_id_text.as_str(), position as i64, tag.as_str()],
            )?;
        }
        tx.commit()?;

        Ok(post_id)
    }

    fn add_comment(&self, user_id: &str, post_id: PostId, text: &str) -> RepoResult<()> {
        let post_id_text = post_id.to_string();
        let tx = self.conn.unchecked_transaction()?;

        let bumped = tx.execute(
            "UPDATE posts SET num_comments = num_comments + 1 WHERE uuid = ?1;",
            [post_id_text.as_str()],
        )?;
        if bumped == 0 {
            return Err(RepoError::not_found("post", post_id));
        }

        tx.execute(
            "INSERT INTO comments (uuid, post_uuid, author_uid, body)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                Uuid::new_v4().to_string(),
                post_id_text.as_str(),
                user_id,
                text
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_post(&self, post_id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([post_id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.parse_post_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(self.parse_post_row(row)?);
        }
        Ok(posts)
    }
}

impl SqlitePostRepository<'_> {
    fn parse_post_row(&self, row: &Row<'_>) -> RepoResult<Post> {
        let uuid_text: String = row.get("uuid")?;
        let id = parse_uuid(&uuid_text, "posts.uuid")?;
        let num_comments: i64 = row.get("num_comments")?;
        let num_comments = u32::try_from(num_comments).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid num_comments `{num_comments}` in posts.num_comments"
            ))
        })?;

        Ok(Post {
            id,
            title: row.get("title")?,
            description: row.get("description")?,
            tags: load_tags_for_post(self.conn, &uuid_text)?,
            author: row.get("author_uid")?,
            time: row.get("created_at")?,
            num_comments,
        })
    }
}

fn load_tags_for_post(conn: &Connection, post_uuid: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT tag
         FROM post_tags
         WHERE post_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([post_uuid])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}
