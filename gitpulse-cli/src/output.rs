//! Terminal output helpers.

use gitpulse_gh::CommitRecord;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Number of sha characters shown in commit summaries
const SHORT_SHA_LEN: usize = 7;

/// Print an error message to stderr
pub fn print_error(message: &str) {
  eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
  eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a value as pretty JSON to stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

/// Format a commit as `[sha7] subject (author) repo`
pub fn format_commit_line(commit: &CommitRecord) -> String {
  let sha = commit.sha().unwrap_or("unknown");
  let short_sha = sha.get(..SHORT_SHA_LEN).unwrap_or(sha);

  format!(
    "[{}] {} ({}) {}",
    short_sha,
    commit.subject().unwrap_or_default(),
    commit.author_name().unwrap_or("unknown"),
    commit.repository
  )
}
