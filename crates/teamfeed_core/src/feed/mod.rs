//! Feed and directory filtering.
//!
//! # Responsibility
//! - Compose text, tag and team criteria over a post snapshot.
//! - Filter the people directory for the directory search bar.
//!
//! # Invariants
//! - Filtering is pure: inputs are borrowed and never mutated.

pub mod criteria;
pub mod directory;
pub mod filter;
