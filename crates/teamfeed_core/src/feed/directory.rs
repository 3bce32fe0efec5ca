//! People-directory filtering by name and expertise.

use crate::model::user::User;
use std::collections::BTreeSet;

/// Expertise chips offered by the directory search bar.
pub const DEFAULT_EXPERTISES: &[&str] = &[
    "Marketing",
    "Industrial Design",
    "Mechanical Engineering",
    "Electrical Engineering",
    "Software Development",
    "Product Owner",
    "UI/UX Design",
    "Finance",
    "Graphic Design",
    "Project Management",
];

/// Flips one expertise chip. Returns `false` when `expertise` is not in
/// `vocabulary`.
pub fn toggle_expertise(
    filter: &mut BTreeSet<String>,
    vocabulary: &[String],
    expertise: &str,
) -> bool {
    if !vocabulary.iter().any(|offered| offered == expertise) {
        return false;
    }
    if !filter.remove(expertise) {
        filter.insert(expertise.to_string());
    }
    true
}

/// Returns directory users matching `name_query` and `expertise_filter`.
///
/// The name query is a case-insensitive substring match on `display_name`;
/// a user passes the expertise filter when it lists at least one selected
/// expertise. Empty inputs are inactive. Source order is kept.
pub fn filter_directory<'a>(
    users: &'a [User],
    name_query: &str,
    expertise_filter: &BTreeSet<String>,
) -> Vec<&'a User> {
    let needle = name_query.trim().to_lowercase();
    users
        .iter()
        .filter(|user| needle.is_empty() || user.display_name.to_lowercase().contains(&needle))
        .filter(|user| {
            expertise_filter.is_empty()
                || user
                    .expertise
                    .iter()
                    .any(|skill| expertise_filter.contains(skill))
        })
        .collect()
}
