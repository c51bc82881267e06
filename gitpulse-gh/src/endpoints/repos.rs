//! GitHub repository endpoint implementations.

use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::consts::PER_PAGE;
use crate::error::Result;
use crate::fetchers::RepoFetcher;
use crate::models::{RepoDetail, Repository};
use crate::pagination::Collected;
use crate::transport::read_json;

impl GitHubClient {
  /// List every repository of `repo_type` visible to the authenticated user.
  ///
  /// `repo_type` is passed through to GitHub unchecked; an unsupported value
  /// surfaces as a provider error in [`Collected::error`].
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_repos(&self, repo_type: &str) -> Collected<Repository> {
    let url = self.transport.endpoint("/user/repos");
    let per_page = PER_PAGE.to_string();

    let repos = self
      .paginator()
      .fetch_all::<Repository>(&url, &[("type", repo_type), ("per_page", per_page.as_str())]);

    info!(
      "Fetched {} repositories over {} pages (complete: {})",
      repos.items.len(),
      repos.pages,
      repos.is_complete()
    );
    repos
  }

  /// Get a repository by its `owner/name` reference.
  ///
  /// # Errors
  ///
  /// Returns [`crate::GitHubError::NotFound`] for unknown or malformed
  /// references, or any other classified failure.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_repo_details(&self, name: &str) -> Result<RepoDetail> {
    let url = self.transport.endpoint(&format!("/repos/{name}"));
    let response = self.get(&url, &[])?;
    let repo = read_json::<RepoDetail>(&url, response)?;
    debug!("Fetched repository {}", repo.full_name().unwrap_or(name));
    Ok(repo)
  }
}

impl RepoFetcher for GitHubClient {
  fn get_repos(&self, repo_type: &str) -> Vec<Repository> {
    let repos = self.fetch_repos(repo_type);
    if let Some(error) = &repos.error {
      self.report("get_repos", "/user/repos", error);
    }
    repos.into_items()
  }

  fn get_repo_details(&self, name: &str) -> Option<RepoDetail> {
    self.absorb("get_repo_details", name, self.fetch_repo_details(name))
  }
}
