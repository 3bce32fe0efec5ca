//! Mention extraction, notification batching and autocomplete.
//!
//! # Responsibility
//! - Read `@`/`#` markers out of rich-text post content.
//! - Convert user mentions into deduplicated notification dispatches.
//! - Offer autocomplete candidates while a mention is being typed.

pub mod batch;
pub mod extract;
pub mod suggest;
