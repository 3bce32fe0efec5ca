//! Mention autocomplete suggestions.
//!
//! # Responsibility
//! - Pick the candidate list for a denotation (`@` people, `#` topics).
//! - Filter candidates by the partially typed term.
//!
//! # Invariants
//! - Matching is case-insensitive substring on the candidate label.
//! - Results keep candidate source order and never exceed the limit.
//! - Terms with characters outside the allowed set produce no suggestions.

use crate::mention::extract::MentionKind;
use crate::model::user::User;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ALLOWED_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\sÅÄÖåäö]*$").expect("valid mention term regex"));

/// Selectable autocomplete entry.
///
/// `id` ends up in the marker's `data-id`, `value` is the visible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionCandidate {
    pub id: String,
    pub value: String,
}

impl MentionCandidate {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Builds `@` candidates from a directory snapshot.
pub fn people_candidates(directory: &[User]) -> Vec<MentionCandidate> {
    directory
        .iter()
        .map(|user| MentionCandidate::new(user.uid.clone(), user.display_name.clone()))
        .collect()
}

/// Returns whether `term` may open the suggestion list at all.
pub fn is_allowed_term(term: &str) -> bool {
    ALLOWED_TERM_RE.is_match(term)
}

/// Returns up to `limit` candidates for the typed `term`.
pub fn suggest_mentions<'a>(
    term: &str,
    kind: MentionKind,
    people: &'a [MentionCandidate],
    topics: &'a [MentionCandidate],
    limit: usize,
) -> Vec<&'a MentionCandidate> {
    if !is_allowed_term(term) {
        return Vec::new();
    }

    let source = match kind {
        MentionKind::User => people,
        MentionKind::Topic => topics,
    };
    let needle = term.to_lowercase();
    source
        .iter()
        .filter(|candidate| candidate.value.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_allowed_term, suggest_mentions, MentionCandidate};
    use crate::mention::extract::MentionKind;

    fn people() -> Vec<MentionCandidate> {
        ["Anna", "Hanna", "Jonas", "Annika", "Joanna", "Susanna", "Ann"]
            .iter()
            .enumerate()
            .map(|(idx, name)| MentionCandidate::new(format!("u{idx}"), *name))
            .collect()
    }

    #[test]
    fn people_match_case_insensitively_and_cap_at_limit() {
        let people = people();
        let hits = suggest_mentions("ANN", MentionKind::User, &people, &[], 5);
        let labels: Vec<_> = hits.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(labels, vec!["Anna", "Hanna", "Annika", "Joanna", "Susanna"]);
    }

    #[test]
    fn topic_denotation_searches_topics_only() {
        let people = people();
        let topics = vec![
            MentionCandidate::new("1", "JavaScript"),
            MentionCandidate::new("2", "TypeScript"),
        ];
        let hits = suggest_mentions("type", MentionKind::Topic, &people, &topics, 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn disallowed_characters_suppress_suggestions() {
        assert!(is_allowed_term("Åsa Öberg"));
        assert!(!is_allowed_term("ann1"));
        let people = people();
        assert!(suggest_mentions("an-", MentionKind::User, &people, &[], 5).is_empty());
    }

    #[test]
    fn empty_term_lists_first_candidates() {
        let people = people();
        assert_eq!(
            suggest_mentions("", MentionKind::User, &people, &[], 3).len(),
            3
        );
    }
}
