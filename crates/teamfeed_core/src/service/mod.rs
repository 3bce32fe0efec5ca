//! Use-case services over the ports.
//!
//! # Responsibility
//! - Orchestrate port calls around the pure mention and feed logic.
//! - Keep presentation callers decoupled from storage details.

pub mod feed_service;
pub mod inbox_service;
pub mod publish_service;
