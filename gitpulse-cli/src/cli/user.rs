//! `gitpulse whoami`

use anyhow::{Context, Result};
use gitpulse_gh::GitHubClient;

use crate::output::print_json;

/// Print the authenticated user's profile
pub fn handle_whoami_command(client: &GitHubClient) -> Result<()> {
  let user = client.fetch_user().context("Failed to fetch the authenticated user")?;
  print_json(&user)
}
