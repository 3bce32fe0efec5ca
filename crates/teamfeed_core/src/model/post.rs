//! Post domain model.
//!
//! # Responsibility
//! - Define the read snapshot of a feed post and its authoring draft.
//! - Validate drafts before they reach the persistence port.
//!
//! # Invariants
//! - `id` and `time` are assigned by the persistence port, never by callers.
//! - `num_comments` only changes through the comment path.
//! - Draft tags are non-blank and unique, first occurrence order kept.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque post identity returned by the persistence port.
pub type PostId = Uuid;

/// Read snapshot of one feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    /// Rich-text (HTML) body as produced by the editor.
    pub description: String,
    /// Phase tags. Unknown values are kept but never match a filter chip.
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: UserId,
    /// Unix epoch milliseconds.
    pub time: i64,
    #[serde(default)]
    pub num_comments: u32,
}

impl Post {
    /// Returns whether any tag of this post satisfies `wanted`.
    pub fn has_any_tag(&self, mut wanted: impl FnMut(&str) -> bool) -> bool {
        self.tags.iter().any(|tag| wanted(tag.as_str()))
    }
}

/// Authoring input for `create_post`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: UserId,
}

impl PostDraft {
    pub fn new(
        author: impl Into<UserId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
            author: author.into(),
        }
    }

    /// Replaces the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the draft and returns a copy with tags deduplicated.
    ///
    /// # Errors
    /// - `EmptyAuthor` when `author` is blank.
    /// - `BlankTag` when any tag is blank after trim.
    pub fn normalized(&self) -> Result<PostDraft, PostValidationError> {
        if self.author.trim().is_empty() {
            return Err(PostValidationError::EmptyAuthor);
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                return Err(PostValidationError::BlankTag(tag.clone()));
            }
            if !tags.iter().any(|existing| existing == trimmed) {
                tags.push(trimmed.to_string());
            }
        }

        Ok(PostDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            tags,
            author: self.author.trim().to_string(),
        })
    }
}

/// Draft validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyAuthor,
    BlankTag(String),
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthor => write!(f, "post author must not be blank"),
            Self::BlankTag(value) => write!(f, "post tag must not be blank: `{value}`"),
        }
    }
}

impl Error for PostValidationError {}

/// Feed-card label for a comment counter.
pub fn comment_count_label(num_comments: u32) -> String {
    match num_comments {
        1 => "1 Comment".to_string(),
        n => format!("{n} Comments"),
    }
}
