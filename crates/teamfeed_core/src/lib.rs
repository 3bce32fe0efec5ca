//! Core domain logic for the team feed.
//! Mention extraction, notification batching and feed filtering live here;
//! storage and presentation layers call into this crate.

pub mod config;
pub mod db;
pub mod feed;
pub mod logging;
pub mod mention;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, FeedConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use feed::criteria::{FilterCriteria, TagVocabulary};
pub use feed::directory::{filter_directory, toggle_expertise};
pub use feed::filter::{filter_feed, DirectoryIndex};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mention::batch::{build_notification_batch, dispatch_batch, DispatchOutcome};
pub use mention::extract::{extract_mentions, MentionKind, MentionReference, MentionScan};
pub use mention::suggest::{suggest_mentions, MentionCandidate};
pub use model::notification::{
    NotificationDispatchRequest, NotificationId, NotificationKind, NotificationRecord,
};
pub use model::post::{comment_count_label, Post, PostDraft, PostId, PostValidationError};
pub use model::user::{TeamId, User, UserId};
pub use repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::feed_service::FeedService;
pub use service::inbox_service::{InboxEntry, InboxService};
pub use service::publish_service::{CommentError, PublishError, PublishReport, PublishService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
