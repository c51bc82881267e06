//! Capability traits implemented by [`crate::GitHubClient`].
//!
//! Callers should depend on the narrowest trait they need. None of these
//! methods fail: problems are reported to the client's diagnostic sink and
//! surface as `None` or an empty (possibly partial) collection.

use chrono::{DateTime, Utc};

use crate::models::{CommitRecord, RepoDetail, Repository, UserProfile};

/// Access to the authenticated user.
pub trait UserFetcher {
  /// The authenticated user's profile.
  fn get_user(&self) -> Option<UserProfile>;
}

/// Access to repositories.
pub trait RepoFetcher {
  /// Every repository of the given `type` visible to the authenticated user
  /// (`all`, `owner`, `public`, `private` or `member`).
  fn get_repos(&self, repo_type: &str) -> Vec<Repository>;

  /// A single repository by `owner/name`.
  fn get_repo_details(&self, name: &str) -> Option<RepoDetail>;
}

/// Access to commits.
pub trait CommitFetcher {
  /// Commits authored by the authenticated user in each of `repos` since
  /// `since`, stamped with their repository.
  fn get_recent_commits(&self, repos: &[String], since: DateTime<Utc>) -> Vec<CommitRecord>;

  /// Metadata for one commit.
  fn get_commit(&self, repo: &str, sha: &str) -> Option<CommitRecord>;

  /// The raw diff of one commit.
  fn get_commit_diff(&self, repo: &str, sha: &str) -> Option<String>;
}
