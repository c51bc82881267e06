//! GitHub API error types and failure classification.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
  /// The credential was rejected before any request was made.
  #[error("Invalid credential: {0}")]
  InvalidCredential(String),

  /// The HTTP client could not be constructed.
  #[error("Failed to construct HTTP client: {0}")]
  ClientBuild(#[source] reqwest::Error),

  /// The provider answered 404 for the requested resource.
  #[error("Resource not found: {url}")]
  NotFound { url: String },

  /// The provider answered with any other non-success status.
  #[error("HTTP {status} from {url}: {message}")]
  Http {
    url: String,
    status: StatusCode,
    message: String,
  },

  /// No HTTP response was received (DNS, TLS, connect, timeout).
  #[error("Transport error for {url}: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// A successful response carried a body that could not be decoded.
  #[error("Failed to decode response from {url}: {message}")]
  Decode { url: String, message: String },

  /// The authenticated profile did not contain a `login` field.
  #[error("Authenticated user profile has no login")]
  MissingLogin,

  /// A pagination link pointed away from the API host; it was not followed.
  #[error("Refusing to follow pagination link {link} from {url}: not on the API origin")]
  UntrustedLink { url: String, link: String },
}

/// Coarse classification of a failure, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
  InvalidCredential,
  NotFound,
  Http,
  Transport,
  Decode,
  MissingLogin,
  UntrustedLink,
}

impl ErrorClass {
  /// Stable, lowercase name suitable for structured log fields.
  pub const fn as_str(&self) -> &'static str {
    match self {
      ErrorClass::InvalidCredential => "invalid_credential",
      ErrorClass::NotFound => "not_found",
      ErrorClass::Http => "http",
      ErrorClass::Transport => "transport",
      ErrorClass::Decode => "decode",
      ErrorClass::MissingLogin => "missing_login",
      ErrorClass::UntrustedLink => "untrusted_link",
    }
  }
}

impl fmt::Display for ErrorClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl GitHubError {
  /// Classify this error.
  pub const fn class(&self) -> ErrorClass {
    match self {
      GitHubError::InvalidCredential(_) => ErrorClass::InvalidCredential,
      GitHubError::ClientBuild(_) | GitHubError::Transport { .. } => ErrorClass::Transport,
      GitHubError::NotFound { .. } => ErrorClass::NotFound,
      GitHubError::Http { .. } => ErrorClass::Http,
      GitHubError::Decode { .. } => ErrorClass::Decode,
      GitHubError::MissingLogin => ErrorClass::MissingLogin,
      GitHubError::UntrustedLink { .. } => ErrorClass::UntrustedLink,
    }
  }

  /// Whether the provider reported the resource as absent.
  pub const fn is_not_found(&self) -> bool {
    matches!(self, GitHubError::NotFound { .. })
  }

  /// The HTTP status attached to this error, if the provider answered at all.
  pub const fn status(&self) -> Option<StatusCode> {
    match self {
      GitHubError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
      GitHubError::Http { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// The URL of the request that failed, when there was one.
  pub fn url(&self) -> Option<&str> {
    match self {
      GitHubError::NotFound { url }
      | GitHubError::Http { url, .. }
      | GitHubError::Transport { url, .. }
      | GitHubError::Decode { url, .. }
      | GitHubError::UntrustedLink { url, .. } => Some(url),
      _ => None,
    }
  }
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, GitHubError>;
