use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a temporary home directory containing a `.netrc` file
///
/// The directory (and the file) are removed when the guard is dropped. The
/// process environment is left untouched, so tests pass [`Self::home_dir`] to
/// the code under test instead of relying on `HOME`.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new home directory whose `.netrc` holds `content`
  pub fn new(content: &str) -> Self {
    let guard = Self::without_netrc();
    fs::write(&guard.netrc_path, content).expect("Failed to write test .netrc");
    guard
  }

  /// Create a home directory that has no `.netrc` at all
  pub fn without_netrc() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
