//! # HTTP Transport
//!
//! A reusable blocking HTTP session shared by every request a client issues.
//! The transport owns the connection pool, the User-Agent and the timeouts.
//! Authentication headers are not installed here; callers pass the headers for
//! each request so that individual requests can override them.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::consts::{API_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, USER_AGENT};
use crate::error::{GitHubError, Result};

/// Settings used to build a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
  /// API root, without a trailing slash (e.g. `https://api.github.com`).
  pub base_url: String,
  pub user_agent: String,
  /// Upper bound for a whole request, body included.
  pub timeout: Duration,
  pub connect_timeout: Duration,
}

impl Default for TransportConfig {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      user_agent: USER_AGENT.to_string(),
      timeout: DEFAULT_TIMEOUT,
      connect_timeout: DEFAULT_CONNECT_TIMEOUT,
    }
  }
}

impl TransportConfig {
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
    self.connect_timeout = connect_timeout;
    self
  }
}

/// Blocking HTTP session used by the GitHub client.
#[derive(Debug, Clone)]
pub struct Transport {
  client: Client,
  base_url: String,
  /// `base_url` parsed, used to vet URLs handed to us by the server
  api_root: Option<Url>,
}

impl Transport {
  /// Build a transport from `config`.
  pub fn new(config: &TransportConfig) -> Result<Self> {
    let client = Client::builder()
      .user_agent(config.user_agent.clone())
      .timeout(config.timeout)
      .connect_timeout(config.connect_timeout)
      .build()
      .map_err(GitHubError::ClientBuild)?;

    let base_url = config.base_url.trim_end_matches('/').to_string();
    Ok(Self {
      client,
      api_root: Url::parse(&base_url).ok(),
      base_url,
    })
  }

  /// The API root this transport talks to.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Absolute URL for an API path such as `/user`.
  pub fn endpoint(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  /// Whether `url` shares the scheme, host and port of the API root.
  ///
  /// Only such URLs may receive the credential headers.
  pub fn is_same_origin(&self, url: &str) -> bool {
    match (&self.api_root, Url::parse(url)) {
      (Some(root), Ok(url)) => root.origin() == url.origin(),
      _ => false,
    }
  }

  /// Issue a GET and classify the outcome.
  ///
  /// `query` is appended to `url`; pass an empty slice to request `url`
  /// verbatim.
  ///
  /// # Errors
  ///
  /// [`GitHubError::Transport`] when no response was received,
  /// [`GitHubError::NotFound`] on 404 and [`GitHubError::Http`] on any other
  /// non-success status.
  pub fn get(&self, url: &str, headers: HeaderMap, query: &[(&str, &str)]) -> Result<Response> {
    trace!("GitHub API URL: {}", url);

    let mut request = self.client.get(url).headers(headers);
    if !query.is_empty() {
      request = request.query(query);
    }

    let response = request.send().map_err(|source| GitHubError::Transport {
      url: url.to_string(),
      source,
    })?;

    classify(url, response)
  }
}

/// Turn a non-success response into the matching error.
fn classify(url: &str, response: Response) -> Result<Response> {
  let status = response.status();
  debug!("GitHub API response status: {}", status);

  if status.is_success() {
    return Ok(response);
  }

  if status == StatusCode::NOT_FOUND {
    return Err(GitHubError::NotFound { url: url.to_string() });
  }

  let body = response.text().unwrap_or_default();
  let message = extract_message(&body)
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

  Err(GitHubError::Http {
    url: url.to_string(),
    status,
    message,
  })
}

/// Pull the `message` field out of a GitHub error body.
fn extract_message(body: &str) -> Option<String> {
  let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
  json.get("message").and_then(|m| m.as_str()).map(str::to_string)
}

/// Read the whole body of `response` as text, byte for byte.
///
/// A body that is not valid UTF-8 is a [`GitHubError::Decode`] failure rather
/// than being lossily converted.
pub(crate) fn read_text(url: &str, response: Response) -> Result<String> {
  let body = response.bytes().map_err(|source| GitHubError::Transport {
    url: url.to_string(),
    source,
  })?;

  String::from_utf8(body.to_vec()).map_err(|e| GitHubError::Decode {
    url: url.to_string(),
    message: format!("response body is not valid UTF-8: {e}"),
  })
}

/// Read the body of `response` and decode it as JSON.
pub(crate) fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
  let body = read_text(url, response)?;
  serde_json::from_str::<T>(&body).map_err(|e| GitHubError::Decode {
    url: url.to_string(),
    message: e.to_string(),
  })
}
