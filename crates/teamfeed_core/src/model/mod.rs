//! Feed domain model.
//!
//! # Responsibility
//! - Define the snapshots the core reads (posts, users) and the requests it
//!   produces (notification dispatches).
//!
//! # Invariants
//! - The core never mutates a `Post` or `User` snapshot it was handed.
//! - Identities (`PostId`, `NotificationId`) are assigned by ports.

pub mod notification;
pub mod post;
pub mod user;
