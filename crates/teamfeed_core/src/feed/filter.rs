//! Client-side feed filtering.
//!
//! # Responsibility
//! - Select the posts that satisfy every active [`FilterCriteria`].
//! - Resolve post authors against a directory snapshot for team filtering.
//!
//! # Invariants
//! - AND across active criteria, OR within one criterion's value set.
//! - Output keeps source order; posts are never copied, sorted or deduplicated.
//! - Inactive criteria return every post untouched.
//! - Unresolvable authors fail the team criterion instead of erroring.

use crate::feed::criteria::FilterCriteria;
use crate::model::post::Post;
use crate::model::user::User;
use log::debug;
use std::collections::HashMap;

/// Uid-indexed view over a directory snapshot.
pub struct DirectoryIndex<'a> {
    by_uid: HashMap<&'a str, &'a User>,
}

impl<'a> DirectoryIndex<'a> {
    /// Indexes `directory`. The first entry for a uid wins over later duplicates.
    pub fn new(directory: &'a [User]) -> Self {
        let mut by_uid = HashMap::with_capacity(directory.len());
        for user in directory {
            by_uid.entry(user.uid.as_str()).or_insert(user);
        }
        Self { by_uid }
    }

    pub fn get(&self, uid: &str) -> Option<&'a User> {
        self.by_uid.get(uid).copied()
    }
}

/// Returns the visible subset of `posts` for `criteria`.
pub fn filter_feed<'a>(
    posts: &'a [Post],
    directory: &[User],
    criteria: &FilterCriteria,
) -> Vec<&'a Post> {
    if criteria.is_inactive() {
        return posts.iter().collect();
    }

    let matcher = FeedMatcher::new(directory, criteria);
    let visible: Vec<&Post> = posts.iter().filter(|post| matcher.accepts(post)).collect();
    debug!(
        "event=feed_filter module=feed status=ok input={} output={} text={} tags={} teams={}",
        posts.len(),
        visible.len(),
        criteria.has_text_query(),
        criteria.tag_filter.len(),
        criteria.team_filter.len()
    );
    visible
}

/// Per-call matcher with the query lowercased and the directory indexed once.
struct FeedMatcher<'c, 'd> {
    criteria: &'c FilterCriteria,
    needle: Option<String>,
    directory: Option<DirectoryIndex<'d>>,
}

impl<'c, 'd> FeedMatcher<'c, 'd> {
    fn new(directory: &'d [User], criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria
                .has_text_query()
                .then(|| criteria.text_query.to_lowercase()),
            directory: criteria
                .has_team_filter()
                .then(|| DirectoryIndex::new(directory)),
        }
    }

    fn accepts(&self, post: &Post) -> bool {
        self.accepts_tags(post) && self.accepts_team(post) && self.accepts_text(post)
    }

    fn accepts_tags(&self, post: &Post) -> bool {
        if !self.criteria.has_tag_filter() {
            return true;
        }
        post.has_any_tag(|tag| self.criteria.tag_filter.contains(tag))
    }

    fn accepts_team(&self, post: &Post) -> bool {
        let Some(directory) = self.directory.as_ref() else {
            return true;
        };
        directory
            .get(post.author.as_str())
            .and_then(|author| author.team_id.as_ref())
            .is_some_and(|team| self.criteria.team_filter.contains(team.as_str()))
    }

    fn accepts_text(&self, post: &Post) -> bool {
        match self.needle.as_deref() {
            Some(needle) => post.description.to_lowercase().contains(needle),
            None => true,
        }
    }
}
