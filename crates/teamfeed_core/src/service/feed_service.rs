//! Feed and directory view use-cases.
//!
//! # Responsibility
//! - Load post and directory snapshots from their ports.
//! - Apply feed/directory filters for presentation callers.
//!
//! # Invariants
//! - Each call reads one snapshot of posts and users; filtering never
//!   re-fetches mid-way.

use crate::feed::criteria::FilterCriteria;
use crate::feed::directory::filter_directory;
use crate::feed::filter::filter_feed;
use crate::model::post::Post;
use crate::model::user::User;
use crate::repo::post_repo::PostRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;
use std::collections::BTreeSet;

/// Read-side facade combining the persistence and directory ports.
pub struct FeedService<P: PostRepository, U: UserRepository> {
    posts: P,
    users: U,
}

impl<P: PostRepository, U: UserRepository> FeedService<P, U> {
    pub fn new(posts: P, users: U) -> Self {
        Self { posts, users }
    }

    /// Returns the posts visible under `criteria`, newest first.
    pub fn visible_posts(&self, criteria: &FilterCriteria) -> RepoResult<Vec<Post>> {
        let posts = self.posts.list_posts()?;
        if criteria.is_inactive() {
            return Ok(posts);
        }
        let directory = self.users.list_users()?;
        Ok(filter_feed(&posts, &directory, criteria)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns directory users matching a name query and expertise chips.
    pub fn find_people(
        &self,
        name_query: &str,
        expertise_filter: &BTreeSet<String>,
    ) -> RepoResult<Vec<User>> {
        let users = self.users.list_users()?;
        Ok(filter_directory(&users, name_query, expertise_filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns the directory snapshot.
    pub fn directory(&self) -> RepoResult<Vec<User>> {
        self.users.list_users()
    }
}
