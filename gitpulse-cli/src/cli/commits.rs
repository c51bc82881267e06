//! `gitpulse commits`, `gitpulse commit` and `gitpulse diff`

use anyhow::{Context, Result, bail};
use chrono::{DateTime, TimeDelta, Utc};
use clap::Args;
use gitpulse_gh::GitHubClient;
use tracing::info;

use crate::config::GitHubSettings;
use crate::consts::DEFAULT_COMMIT_WINDOW_HOURS;
use crate::output::{format_commit_line, print_json, print_warning};

/// Arguments for `gitpulse commits`
#[derive(Args)]
pub struct CommitsArgs {
  /// How far back to look, in hours
  #[arg(long, value_name = "HOURS", default_value_t = DEFAULT_COMMIT_WINDOW_HOURS)]
  pub hours: u32,

  /// Repositories as owner/name (defaults to the configured watchlist)
  #[arg(value_name = "OWNER/NAME")]
  pub repos: Vec<String>,
}

/// Arguments for `gitpulse commit` and `gitpulse diff`
#[derive(Args)]
pub struct CommitArgs {
  /// Repository as owner/name
  #[arg(value_name = "OWNER/NAME")]
  pub repo: String,

  /// Commit sha
  pub sha: String,
}

/// Print the user's recent commits across repositories
pub fn handle_commits_command(client: &GitHubClient, settings: &GitHubSettings, args: &CommitsArgs) -> Result<()> {
  let repos = if args.repos.is_empty() {
    &settings.repos
  } else {
    &args.repos
  };
  if repos.is_empty() {
    bail!("No repositories given. Pass OWNER/NAME arguments or set `repos` in the [github] config table");
  }

  let since = window_start(Utc::now(), args.hours)?;
  info!("Collecting commits since {}", since);

  let recent = client
    .fetch_recent_commits(repos, since)
    .context("Failed to determine the authenticated user")?;

  for commit in &recent.commits {
    println!("{}", format_commit_line(commit));
  }
  for skipped in &recent.skipped {
    print_warning(&format!("Skipped {}: {}", skipped.repository, skipped.error));
  }

  Ok(())
}

/// The instant `hours` before `now`
fn window_start(now: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>> {
  TimeDelta::try_hours(i64::from(hours))
    .and_then(|window| now.checked_sub_signed(window))
    .with_context(|| format!("--hours {hours} reaches before the earliest supported date"))
}

/// Print commit metadata
pub fn handle_commit_command(client: &GitHubClient, args: &CommitArgs) -> Result<()> {
  let commit = client
    .fetch_commit(&args.repo, &args.sha)
    .with_context(|| format!("Failed to fetch commit {} in {}", args.sha, args.repo))?;
  print_json(&commit)
}

/// Print the raw diff of a commit
pub fn handle_diff_command(client: &GitHubClient, args: &CommitArgs) -> Result<()> {
  let diff = client
    .fetch_commit_diff(&args.repo, &args.sha)
    .with_context(|| format!("Failed to fetch diff of {} in {}", args.sha, args.repo))?;
  print!("{diff}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use gitpulse_gh::PersonalAccessToken;

  use super::*;

  #[test]
  fn test_window_start() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
    assert_eq!(
      window_start(now, 24).unwrap(),
      Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    );
    assert_eq!(window_start(now, 0).unwrap(), now);
  }

  #[test]
  fn test_window_start_out_of_range() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
    let err = window_start(now, u32::MAX).unwrap_err();
    assert!(err.to_string().contains("--hours 4294967295"));
  }

  #[test]
  fn test_commits_command_rejects_huge_window_without_requests() {
    // Nothing listens on the discard port, so a request would fail with a transport error instead
    let settings = GitHubSettings {
      base_url: "http://127.0.0.1:9".to_string(),
      ..GitHubSettings::default()
    };
    let auth = PersonalAccessToken::new("test_token").unwrap();
    let client = GitHubClient::with_config(auth, &settings.transport_config()).unwrap();
    let args = CommitsArgs {
      hours: u32::MAX,
      repos: vec!["a/b".to_string()],
    };

    let err = handle_commits_command(&client, &settings, &args).unwrap_err();
    assert!(err.to_string().contains("earliest supported date"));
  }
}
