//! Test utilities shared across the gitpulse workspace
//!
//! This crate provides common testing infrastructure including:
//! - Fake GitHub collection endpoints served by `wiremock` ([`github`])
//! - Temporary home directories holding a `.netrc` ([`NetrcGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod github;
pub mod netrc;

// Re-export commonly used items
pub use github::{commit_list, link_next, mount_pages, page_response, page_url, repo_page};
pub use netrc::NetrcGuard;
