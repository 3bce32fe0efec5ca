//! Filter criteria and the controlled tag vocabulary.
//!
//! # Responsibility
//! - Hold the view-session filter state (text query, tag chips, team chips).
//! - Gate tag chips on the controlled vocabulary.
//!
//! # Invariants
//! - A criterion is active iff its value is non-empty.
//! - `tag_filter` only ever contains vocabulary tags when built through
//!   [`FilterCriteria::toggle_tag`].

use crate::model::user::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Phase tags offered by the authoring form and the feed filter chips.
pub const DEFAULT_PHASE_TAGS: &[&str] = &[
    "Ethnography",
    "Market Research",
    "Brainstorming",
    "Idea Convergence",
    "Prototyping",
    "Engineering/Design",
    "Materials Selection",
    "Business Modeling",
    "Story/Presentation",
];

/// Ordered, fixed list of tags a filter chip can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl TagVocabulary {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership; chips carry the canonical label.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|known| known == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_TAGS.iter().copied())
    }
}

/// Active feed filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query; matched against post descriptions.
    #[serde(default)]
    pub text_query: String,
    /// Selected phase tags (OR within the set).
    #[serde(default)]
    pub tag_filter: BTreeSet<String>,
    /// Selected team ids in string form (OR within the set).
    #[serde(default)]
    pub team_filter: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = query.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_filter = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_teams<I, T>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamId>,
    {
        self.team_filter = teams
            .into_iter()
            .map(|team| String::from(team.into()))
            .collect();
        self
    }

    pub fn has_text_query(&self) -> bool {
        !self.text_query.is_empty()
    }

    pub fn has_tag_filter(&self) -> bool {
        !self.tag_filter.is_empty()
    }

    pub fn has_team_filter(&self) -> bool {
        !self.team_filter.is_empty()
    }

    /// Returns whether no criterion is active.
    pub fn is_inactive(&self) -> bool {
        !self.has_text_query() && !self.has_tag_filter() && !self.has_team_filter()
    }

    /// Flips one tag chip. Returns `false` when `tag` is not in `vocabulary`.
    pub fn toggle_tag(&mut self, vocabulary: &TagVocabulary, tag: &str) -> bool {
        if !vocabulary.contains(tag) {
            return false;
        }
        if !self.tag_filter.remove(tag) {
            self.tag_filter.insert(tag.to_string());
        }
        true
    }

    /// Flips one team chip.
    pub fn toggle_team(&mut self, team: &TeamId) {
        if !self.team_filter.remove(team.as_str()) {
            self.team_filter.insert(team.to_string());
        }
    }

    /// Drops every active criterion.
    pub fn clear(&mut self) {
        self.text_query.clear();
        self.tag_filter.clear();
        self.team_filter.clear();
    }
}
