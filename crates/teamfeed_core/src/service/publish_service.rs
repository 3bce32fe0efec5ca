//! Post authoring use-cases.
//!
//! # Responsibility
//! - Persist a new post, then notify every user mentioned in it.
//! - Record comments on existing posts.
//!
//! # Invariants
//! - Mention dispatch only starts after `create_post` succeeded.
//! - Each mention dispatch succeeds or fails on its own; nothing is retried.
//! - Blank comments never reach the persistence port.

use crate::config::DEFAULT_MENTION_PREVIEW_TEXT;
use crate::mention::batch::{build_notification_batch, dispatch_batch, DispatchOutcome};
use crate::mention::extract::MentionScan;
use crate::model::post::{PostDraft, PostId, PostValidationError};
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::post_repo::PostRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Publish failure. Nothing is dispatched when this is returned.
#[derive(Debug)]
pub enum PublishError {
    /// Draft rejected before any write.
    Validation(PostValidationError),
    /// `create_post` failed.
    Persistence(RepoError),
}

impl Display for PublishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to persist post: {err}"),
        }
    }
}

impl Error for PublishError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

/// Comment failure.
#[derive(Debug)]
pub enum CommentError {
    BlankComment,
    PostNotFound(PostId),
    Persistence(RepoError),
}

impl Display for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankComment => write!(f, "comment must not be blank"),
            Self::PostNotFound(post_id) => write!(f, "post not found: {post_id}"),
            Self::Persistence(err) => write!(f, "failed to persist comment: {err}"),
        }
    }
}

impl Error for CommentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

/// What happened during one successful publish.
#[derive(Debug)]
pub struct PublishReport {
    pub post_id: PostId,
    /// One entry per deduplicated mention, in document order.
    pub outcomes: Vec<DispatchOutcome>,
}

impl PublishReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }
}

/// Authoring facade over the persistence and notification ports.
pub struct PublishService<P: PostRepository, N: NotificationRepository> {
    posts: P,
    notifications: N,
    preview_text: String,
}

impl<P: PostRepository, N: NotificationRepository> PublishService<P, N> {
    pub fn new(posts: P, notifications: N) -> Self {
        Self {
            posts,
            notifications,
            preview_text: DEFAULT_MENTION_PREVIEW_TEXT.to_string(),
        }
    }

    /// Overrides the body sent with every mention notification.
    pub fn with_preview_text(mut self, preview_text: impl Into<String>) -> Self {
        self.preview_text = preview_text.into();
        self
    }

    /// Persists `draft` and dispatches its mention notifications.
    ///
    /// # Errors
    /// - `Validation` when the draft is malformed.
    /// - `Persistence` when the post could not be created; no notification
    ///   is attempted in that case.
    ///
    /// Dispatch failures do not fail the publish; they are listed in the
    /// returned report.
    pub fn publish(&self, draft: &PostDraft) -> Result<PublishReport, PublishError> {
        let started_at = Instant::now();
        let draft = draft.normalized().map_err(PublishError::Validation)?;

        let post_id = self.posts.create_post(&draft).map_err(|err| {
            error!(
                "event=post_publish module=service status=error duration_ms={} error_code=create_post_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            PublishError::Persistence(err)
        })?;

        let scan = MentionScan::parse(&draft.description);
        let batch = build_notification_batch(
            scan.iter(),
            draft.author.as_str(),
            post_id,
            self.preview_text.as_str(),
        );
        let outcomes = dispatch_batch(&self.notifications, batch);
        let report = PublishReport { post_id, outcomes };

        info!(
            "event=post_publish module=service status=ok duration_ms={} post_id={} tags={} mentions={} delivered={}",
            started_at.elapsed().as_millis(),
            post_id,
            draft.tags.len(),
            report.outcomes.len(),
            report.delivered()
        );
        Ok(report)
    }

    /// Adds a comment to an existing post.
    pub fn add_comment(
        &self,
        user_id: &str,
        post_id: PostId,
        text: &str,
    ) -> Result<(), CommentError> {
        if text.trim().is_empty() {
            return Err(CommentError::BlankComment);
        }

        self.posts
            .add_comment(user_id, post_id, text)
            .map_err(|err| match err {
                RepoError::NotFound { .. } => CommentError::PostNotFound(post_id),
                other => CommentError::Persistence(other),
            })
    }
}
