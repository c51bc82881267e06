//! # GitHub API Endpoints
//!
//! Endpoint implementations grouped by resource type. Each module provides
//! `fetch_*` methods returning [`crate::error::Result`] and implements the
//! matching capability trait from [`crate::fetchers`] on top of them.

pub mod commits;
pub mod repos;
pub mod users;
