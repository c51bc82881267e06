//! `gitpulse repos` and `gitpulse repo`

use anyhow::{Context, Result};
use clap::Args;
use gitpulse_gh::GitHubClient;
use gitpulse_gh::consts::DEFAULT_REPO_TYPE;

use crate::output::{print_json, print_warning};

/// Arguments for `gitpulse repos`
#[derive(Args)]
pub struct ReposArgs {
  /// Repository type: all, owner, public, private or member
  #[arg(long = "type", value_name = "TYPE", default_value = DEFAULT_REPO_TYPE)]
  pub repo_type: String,
}

/// Arguments for `gitpulse repo`
#[derive(Args)]
pub struct RepoArgs {
  /// Repository as owner/name
  #[arg(value_name = "OWNER/NAME")]
  pub name: String,
}

/// List repository full names, warning when the listing is incomplete
pub fn handle_repos_command(client: &GitHubClient, args: &ReposArgs) -> Result<()> {
  let repos = client.fetch_repos(&args.repo_type);

  for repo in &repos.items {
    println!("{}", repo.full_name().unwrap_or("<unnamed>"));
  }

  match repos.error {
    Some(error) if repos.items.is_empty() => Err(error).context("Failed to list repositories"),
    Some(error) => {
      print_warning(&format!(
        "Listing stopped after {} repositories: {error}",
        repos.items.len()
      ));
      Ok(())
    }
    None => Ok(()),
  }
}

/// Print repository details
pub fn handle_repo_command(client: &GitHubClient, args: &RepoArgs) -> Result<()> {
  let repo = client
    .fetch_repo_details(&args.name)
    .with_context(|| format!("Failed to fetch repository {}", args.name))?;
  print_json(&repo)
}
