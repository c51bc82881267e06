//! # Client Creation
//!
//! Builds an authenticated GitHub client from the command line, the
//! environment and the configuration file.

use anyhow::{Context, Result};
use gitpulse_gh::{GitHubClient, PersonalAccessToken};
use tracing::debug;

use crate::config::GitHubSettings;
use crate::creds::get_github_token;

/// Create a GitHub client for `settings`, authenticated with the first token found
pub fn create_github_client_from_settings(settings: &GitHubSettings, token: Option<&str>) -> Result<GitHubClient> {
  let token = get_github_token(token)?;
  let auth = PersonalAccessToken::new(token).context("Invalid GitHub token")?;

  let client =
    GitHubClient::with_config(auth, &settings.transport_config()).context("Failed to create GitHub client")?;
  debug!("Created GitHub client for {}", client.base_url());
  Ok(client)
}
