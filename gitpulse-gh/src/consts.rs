//! Constants for the gitpulse-gh client

use std::time::Duration;

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("gitpulse/", env!("CARGO_PKG_VERSION"));

/// Accept header value for JSON resources
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Accept header value for raw commit diffs
pub const ACCEPT_DIFF: &str = "application/vnd.github.v3.diff";

/// Page size requested from every collection endpoint (GitHub's maximum)
pub const PER_PAGE: u32 = 100;

/// Repository type used when the caller has no preference
pub const DEFAULT_REPO_TYPE: &str = "owner";

/// Total time allowed for a single request, including reading the body
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed for establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
