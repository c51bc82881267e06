//! # Credential Discovery
//!
//! Finds the GitHub token gitpulse authenticates with. Sources are tried in
//! order: the `--token` flag, the `GITHUB_TOKEN` environment variable, then the
//! `password` of the `machine github.com` entry in `~/.netrc`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::BaseDirs;
use tracing::debug;

use crate::consts::{ENV_GITHUB_TOKEN, GITHUB_MACHINE};

/// A login/password pair from `.netrc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Get the path to the .netrc file in `home`
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parse a .netrc file for the credentials of `target_machine`
///
/// Entries may span any number of lines. Returns `Ok(None)` when the machine
/// is missing or has no password; a `default` entry is ignored.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(parse_netrc(&content, target_machine))
}

fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut in_target = false;
  let mut username = String::new();
  let mut password = String::new();

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        if in_target {
          break;
        }
        in_target = tokens.next() == Some(target_machine);
      }
      "default" => {
        if in_target {
          break;
        }
      }
      "login" | "password" | "account" => {
        let value = tokens.next().unwrap_or_default();
        if in_target {
          match token {
            "login" => username = value.to_string(),
            "password" => password = value.to_string(),
            _ => {}
          }
        }
      }
      _ => {}
    }
  }

  (!password.is_empty()).then_some(Credentials { username, password })
}

/// Pick the first available token
///
/// `explicit` comes from the command line, `env_token` from the environment
/// and `home` locates `.netrc`. Empty values are skipped.
pub fn resolve_token(explicit: Option<&str>, env_token: Option<String>, home: Option<&Path>) -> Result<String> {
  if let Some(token) = explicit.filter(|token| !token.is_empty()) {
    debug!("Using GitHub token from the command line");
    return Ok(token.to_string());
  }

  if let Some(token) = env_token.filter(|token| !token.is_empty()) {
    debug!("Using GitHub token from {}", ENV_GITHUB_TOKEN);
    return Ok(token);
  }

  if let Some(home) = home {
    let netrc_path = get_netrc_path(home);
    if netrc_path.exists() {
      if let Some(credentials) = parse_netrc_file(&netrc_path, GITHUB_MACHINE)? {
        debug!("Using GitHub token from {}", netrc_path.display());
        return Ok(credentials.password);
      }
    }
  }

  bail!(
    "No GitHub token found. Pass --token, set {ENV_GITHUB_TOKEN}, or add a `machine {GITHUB_MACHINE}` entry to ~/.netrc"
  )
}

/// Resolve the GitHub token from the flag, the environment and `~/.netrc`
pub fn get_github_token(explicit: Option<&str>) -> Result<String> {
  let base_dirs = BaseDirs::new();
  resolve_token(
    explicit,
    std::env::var(ENV_GITHUB_TOKEN).ok(),
    base_dirs.as_ref().map(BaseDirs::home_dir),
  )
}
