//! Constants shared by the CLI.

/// Name of the application, used for configuration directories.
pub const APP_NAME: &str = "gitpulse";

/// Qualifier used for project directories.
pub const APP_QUALIFIER: &str = "dev";

/// Organization used for project directories.
pub const APP_ORGANIZATION: &str = "gitpulse";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding a GitHub token.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// `.netrc` machine holding GitHub credentials.
pub const GITHUB_MACHINE: &str = "github.com";

/// Window for `gitpulse commits` when `--hours` is not given.
pub const DEFAULT_COMMIT_WINDOW_HOURS: u32 = 24;
