use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::{GitHubError, Result};
use crate::fetchers::UserFetcher;
use crate::models::UserProfile;
use crate::transport::read_json;

impl GitHubClient {
  /// Get the current authenticated user
  ///
  /// # Errors
  ///
  /// Returns the classified failure of `GET /user`.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_user(&self) -> Result<UserProfile> {
    let url = self.transport.endpoint("/user");
    let response = self.get(&url, &[])?;
    read_json::<UserProfile>(&url, response)
  }

  /// Get the login of the authenticated user
  ///
  /// # Errors
  ///
  /// Fails like [`Self::fetch_user`], or with [`GitHubError::MissingLogin`]
  /// when the profile carries no login.
  #[instrument(skip(self), level = "debug")]
  pub fn fetch_login(&self) -> Result<String> {
    let user = self.fetch_user()?;
    let login = user.login().ok_or(GitHubError::MissingLogin)?.to_string();
    info!("Authenticated as {}", login);
    Ok(login)
  }
}

impl UserFetcher for GitHubClient {
  fn get_user(&self) -> Option<UserProfile> {
    self.absorb("get_user", "/user", self.fetch_user())
  }
}
