//! Feed configuration.
//!
//! # Responsibility
//! - Externalize the controlled vocabularies and mention defaults.
//! - Load overrides from JSON while falling back to built-in defaults.
//!
//! # Invariants
//! - A validated config has a non-empty tag vocabulary without blank or
//!   duplicate entries and a positive suggestion limit.

use crate::feed::criteria::TagVocabulary;
use crate::feed::directory::DEFAULT_EXPERTISES;
use crate::mention::suggest::MentionCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Notification body used for mention dispatches.
pub const DEFAULT_MENTION_PREVIEW_TEXT: &str = "click to check the post";
/// Maximum autocomplete entries shown at once.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Runtime configuration for feed, directory and mention behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub phase_tags: TagVocabulary,
    pub expertises: Vec<String>,
    pub mention_topics: Vec<MentionCandidate>,
    pub mention_preview_text: String,
    pub suggestion_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            phase_tags: TagVocabulary::default(),
            expertises: DEFAULT_EXPERTISES.iter().map(|value| value.to_string()).collect(),
            mention_topics: default_mention_topics(),
            mention_preview_text: DEFAULT_MENTION_PREVIEW_TEXT.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl FeedConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phase_tags.is_empty() {
            return Err(ConfigError::EmptyVocabulary("phase_tags"));
        }
        check_entries("phase_tags", self.phase_tags.tags().iter().map(String::as_str))?;
        check_entries("expertises", self.expertises.iter().map(String::as_str))?;
        check_entries(
            "mention_topics",
            self.mention_topics.iter().map(|topic| topic.id.as_str()),
        )?;
        if self.suggestion_limit == 0 {
            return Err(ConfigError::ZeroSuggestionLimit);
        }
        Ok(())
    }
}

fn default_mention_topics() -> Vec<MentionCandidate> {
    ["JavaScript", "TypeScript", "Ruby", "Python"]
        .iter()
        .enumerate()
        .map(|(idx, label)| MentionCandidate::new((idx + 1).to_string(), *label))
        .collect()
}

fn check_entries<'a>(
    field: &'static str,
    values: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(ConfigError::BlankEntry(field));
        }
        if !seen.insert(value) {
            return Err(ConfigError::DuplicateEntry {
                field,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Config loading/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    EmptyVocabulary(&'static str),
    BlankEntry(&'static str),
    DuplicateEntry { field: &'static str, value: String },
    ZeroSuggestionLimit,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::EmptyVocabulary(field) => write!(f, "config `{field}` must not be empty"),
            Self::BlankEntry(field) => write!(f, "config `{field}` contains a blank entry"),
            Self::DuplicateEntry { field, value } => {
                write!(f, "config `{field}` contains duplicate entry `{value}`")
            }
            Self::ZeroSuggestionLimit => write!(f, "config `suggestion_limit` must be positive"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
