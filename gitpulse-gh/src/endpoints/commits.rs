//! GitHub commit endpoint implementations.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::client::GitHubClient;
use crate::consts::{ACCEPT_DIFF, PER_PAGE};
use crate::error::Result;
use crate::fetchers::CommitFetcher;
use crate::models::{CommitRecord, RecentCommits, SkippedRepo};
use crate::pagination::Collected;
use crate::transport::{read_json, read_text};

/// `since` in the form GitHub expects, e.g. `2024-01-01T12:00:00Z`
fn format_since(since: DateTime<Utc>) -> String {
  since.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl GitHubClient {
  /// List commits in `repo` by `author` since `since`, following pagination.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_commits(&self, repo: &str, since: DateTime<Utc>, author: &str) -> Collected<CommitRecord> {
    let url = self.transport.endpoint(&format!("/repos/{repo}/commits"));
    let since = format_since(since);
    let per_page = PER_PAGE.to_string();

    self
      .paginator()
      .fetch_all::<Map<String, Value>>(
        &url,
        &[
          ("since", since.as_str()),
          ("author", author),
          ("per_page", per_page.as_str()),
        ],
      )
      .map(|data| CommitRecord::new(repo, data))
  }

  /// Collect the authenticated user's commits since `since` across `repos`.
  ///
  /// Repositories are visited in order. A repository that fails is recorded in
  /// [`RecentCommits::skipped`] and the walk continues; commits it yielded
  /// before failing are kept.
  ///
  /// # Errors
  ///
  /// Fails only when the authenticated user cannot be resolved, in which case
  /// no repository is queried.
  #[instrument(skip(self, repos), level = "debug")]
  pub fn fetch_recent_commits(&self, repos: &[String], since: DateTime<Utc>) -> Result<RecentCommits> {
    let login = self.fetch_login()?;
    let mut recent = RecentCommits::default();

    for repo in repos {
      let collected = self.fetch_commits(repo, since, &login);
      debug!("Fetched {} commits from {}", collected.items.len(), repo);

      recent.commits.extend(collected.items);
      if let Some(error) = collected.error {
        warn!("Skipping {}: {}", repo, error);
        recent.skipped.push(SkippedRepo {
          repository: repo.clone(),
          error,
        });
      }
    }

    info!(
      "Collected {} commits from {} repositories ({} skipped)",
      recent.commits.len(),
      repos.len(),
      recent.skipped.len()
    );
    Ok(recent)
  }

  /// Get the metadata of one commit.
  ///
  /// # Errors
  ///
  /// Returns [`crate::GitHubError::NotFound`] for an unknown repository or
  /// commit, or any other classified failure.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_commit(&self, repo: &str, sha: &str) -> Result<CommitRecord> {
    let url = self.transport.endpoint(&format!("/repos/{repo}/commits/{sha}"));
    let response = self.get(&url, &[])?;
    let data = read_json::<Map<String, Value>>(&url, response)?;
    Ok(CommitRecord::new(repo, data))
  }

  /// Get the unified diff of one commit, exactly as GitHub returns it.
  ///
  /// # Errors
  ///
  /// Returns [`crate::GitHubError::NotFound`] for an unknown repository or
  /// commit, or any other classified failure.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_commit_diff(&self, repo: &str, sha: &str) -> Result<String> {
    let url = self.transport.endpoint(&format!("/repos/{repo}/commits/{sha}"));

    let mut headers = self.headers();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_DIFF));

    let response = self.transport.get(&url, headers, &[])?;
    let diff = read_text(&url, response)?;
    debug!("Fetched {} byte diff for {}@{}", diff.len(), repo, sha);
    Ok(diff)
  }
}

impl CommitFetcher for GitHubClient {
  fn get_recent_commits(&self, repos: &[String], since: DateTime<Utc>) -> Vec<CommitRecord> {
    match self.fetch_recent_commits(repos, since) {
      Ok(recent) => {
        for skipped in &recent.skipped {
          self.report("get_recent_commits", &skipped.repository, &skipped.error);
        }
        recent.commits
      }
      Err(error) => {
        self.report("get_recent_commits", "/user", &error);
        Vec::new()
      }
    }
  }

  fn get_commit(&self, repo: &str, sha: &str) -> Option<CommitRecord> {
    let endpoint = format!("{repo}@{sha}");
    self.absorb("get_commit", &endpoint, self.fetch_commit(repo, sha))
  }

  fn get_commit_diff(&self, repo: &str, sha: &str) -> Option<String> {
    let endpoint = format!("{repo}@{sha}");
    self.absorb("get_commit_diff", &endpoint, self.fetch_commit_diff(repo, sha))
  }
}
