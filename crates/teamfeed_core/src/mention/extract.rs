//! Structural mention scan over rich-text post content.
//!
//! # Responsibility
//! - Parse editor HTML into a node tree and collect mention marker elements.
//! - Classify markers into user (`@`) and topic (`#`) references.
//!
//! # Invariants
//! - Markers are found at any nesting depth, in document order.
//! - Malformed markers (no usable `data-id`, unknown denotation) are skipped.
//! - A scan holds no state between iterations; re-iterating yields the same
//!   sequence.

use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};

/// CSS class the editor puts on every mention marker element.
pub const MENTION_MARKER_CLASS: &str = "mention";
/// Attribute carrying the denotation character (`@` or `#`).
pub const DENOTATION_ATTR: &str = "data-denotation-char";
/// Attribute carrying the mentioned target identifier.
pub const TARGET_ID_ATTR: &str = "data-id";

/// What a mention points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionKind {
    /// `@` reference to a directory user.
    User,
    /// `#` reference to a topic.
    Topic,
}

impl MentionKind {
    /// Maps a denotation string to a mention kind.
    pub fn from_denotation(value: &str) -> Option<Self> {
        match value.trim() {
            "@" => Some(Self::User),
            "#" => Some(Self::Topic),
            _ => None,
        }
    }
}

/// One mention found in content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionReference {
    pub kind: MentionKind,
    pub target_id: String,
    /// Count of text characters preceding the marker in document order.
    pub source_offset: usize,
}

/// Parsed content ready to be scanned for mentions.
///
/// Parsing happens once in [`MentionScan::parse`]; every call to
/// [`MentionScan::iter`] walks the tree lazily from the start.
pub struct MentionScan {
    document: Html,
}

impl MentionScan {
    pub fn parse(content: &str) -> Self {
        Self {
            document: Html::parse_fragment(content),
        }
    }

    /// Returns a fresh lazy iterator over the mention markers.
    pub fn iter(&self) -> impl Iterator<Item = MentionReference> + '_ {
        self.document
            .root_element()
            .descendants()
            .scan(0usize, |text_offset, node| {
                let here = *text_offset;
                if let Node::Text(text) = node.value() {
                    *text_offset += text.chars().count();
                }
                Some((here, node))
            })
            .filter_map(|(offset, node)| {
                ElementRef::wrap(node).and_then(|element| marker_reference(element, offset))
            })
    }
}

/// Extracts every well-formed mention marker from `content`.
pub fn extract_mentions(content: &str) -> Vec<MentionReference> {
    MentionScan::parse(content).iter().collect()
}

fn marker_reference(element: ElementRef<'_>, offset: usize) -> Option<MentionReference> {
    let value = element.value();
    if !value.classes().any(|class| class == MENTION_MARKER_CLASS) {
        return None;
    }

    let kind = MentionKind::from_denotation(value.attr(DENOTATION_ATTR)?)?;
    let target_id = value.attr(TARGET_ID_ATTR)?.trim();
    if target_id.is_empty() {
        return None;
    }

    Some(MentionReference {
        kind,
        target_id: target_id.to_string(),
        source_offset: offset,
    })
}
