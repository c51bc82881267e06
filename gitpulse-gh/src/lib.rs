//! # GitHub API Client
//!
//! Blocking client for the slice of the GitHub REST API gitpulse needs: the
//! authenticated user, their repositories, and commit metadata and diffs.
//!
//! Every operation exists twice. The capability traits in [`fetchers`] never
//! fail and report problems to a [`DiagnosticSink`]; the `fetch_*` methods on
//! [`GitHubClient`] return the classified [`GitHubError`] instead, so callers
//! can tell "not found" from "request failed" and a partial listing from a
//! complete one.

pub mod auth;
pub mod client;
pub mod consts;
pub mod diagnostics;
pub mod endpoints;
pub mod error;
pub mod fetchers;
pub mod models;
pub mod pagination;
pub mod transport;

pub use auth::{AuthStrategy, Credential, PersonalAccessToken};
// Re-export the client
pub use client::{GitHubClient, create_github_client};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{ErrorClass, GitHubError, Result};
pub use fetchers::{CommitFetcher, RepoFetcher, UserFetcher};
// Re-export models
pub use models::{CommitRecord, RecentCommits, RepoDetail, Repository, SkippedRepo, UserProfile};
pub use pagination::{Collected, Paginator, next_link};
pub use transport::{Transport, TransportConfig};
