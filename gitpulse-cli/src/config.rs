//! # Configuration Management
//!
//! Locates the gitpulse configuration directory and loads the optional
//! `config.toml` that tunes the GitHub client and lists the repositories
//! watched by `gitpulse commits`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use gitpulse_gh::TransportConfig;
use gitpulse_gh::consts::{API_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CONFIG_FILE_NAME};

/// Represents the configuration directories for gitpulse
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
      .context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub github: GitHubSettings,
}

/// The `[github]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
  /// API root, e.g. `https://github.example.com/api/v3` for GitHub Enterprise
  pub base_url: String,
  pub timeout_secs: u64,
  pub connect_timeout_secs: u64,
  /// Default watchlist for `gitpulse commits`
  pub repos: Vec<String>,
}

impl Default for GitHubSettings {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      timeout_secs: DEFAULT_TIMEOUT.as_secs(),
      connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
      repos: Vec::new(),
    }
  }
}

impl GitHubSettings {
  /// Check values that would make every request fail
  pub fn validate(&self) -> Result<()> {
    ensure!(self.timeout_secs > 0, "github.timeout_secs must be greater than zero");
    ensure!(
      self.connect_timeout_secs > 0,
      "github.connect_timeout_secs must be greater than zero"
    );
    Ok(())
  }

  /// Transport settings for the GitHub client
  pub fn transport_config(&self) -> TransportConfig {
    TransportConfig::default()
      .with_base_url(self.base_url.as_str())
      .with_timeout(Duration::from_secs(self.timeout_secs))
      .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
  }
}

impl Settings {
  /// Load settings from `path`, falling back to defaults when it does not exist
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!("No config file at {}, using defaults", path.display());
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    let settings: Self =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;
    settings
      .github
      .validate()
      .with_context(|| format!("Invalid config in {}", path.display()))?;

    debug!("Loaded config from {}", path.display());
    Ok(settings)
  }

  /// Load settings from `path` if given, otherwise from the default location
  pub fn load_from(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::load(path),
      None => Self::load(&ConfigDirs::new()?.config_path()),
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load(&temp_dir.path().join("config.toml")).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.github.base_url, "https://api.github.com");
    assert_eq!(settings.github.timeout_secs, 30);
    assert_eq!(settings.github.connect_timeout_secs, 10);
    assert!(settings.github.repos.is_empty());
  }

  #[test]
  fn test_load_full_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
      &path,
      r#"
[github]
base_url = "https://github.example.com/api/v3/"
timeout_secs = 5
connect_timeout_secs = 2
repos = ["octocat/Hello-World", "octocat/Spoon-Knife"]
"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.github.repos, ["octocat/Hello-World", "octocat/Spoon-Knife"]);

    let transport = settings.github.transport_config();
    assert_eq!(transport.base_url, "https://github.example.com/api/v3");
    assert_eq!(transport.timeout, Duration::from_secs(5));
    assert_eq!(transport.connect_timeout, Duration::from_secs(2));
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[github]\nrepos = [\"a/b\"]\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.github.repos, ["a/b"]);
    assert_eq!(settings.github.base_url, "https://api.github.com");
    assert_eq!(settings.github.timeout_secs, 30);
  }

  #[test]
  fn test_invalid_file_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[github\nbase_url = ").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
    assert!(err.to_string().contains("config.toml"));
  }

  #[test]
  fn test_zero_timeouts_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    for (content, field) in [
      ("[github]\ntimeout_secs = 0\n", "timeout_secs"),
      ("[github]\nconnect_timeout_secs = 0\n", "connect_timeout_secs"),
    ] {
      fs::write(&path, content).unwrap();
      let err = Settings::load(&path).unwrap_err();
      let rendered = format!("{err:#}");
      assert!(rendered.contains("Invalid config in"));
      assert!(rendered.contains("config.toml"));
      assert!(rendered.contains(field));
    }
  }

  #[test]
  fn test_config_path() {
    let dirs = ConfigDirs {
      config_dir: PathBuf::from("/tmp/gitpulse"),
    };
    assert_eq!(dirs.config_path(), PathBuf::from("/tmp/gitpulse/config.toml"));
  }
}
