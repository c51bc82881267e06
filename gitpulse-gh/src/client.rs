//! # GitHub HTTP Client
//!
//! The client composes an [`AuthStrategy`] with a [`Transport`] and exposes
//! user, repository and commit operations. Both parts are fixed for the
//! lifetime of the client.

use std::fmt;
use std::sync::Arc;

use reqwest::blocking::Response;
use reqwest::header::HeaderMap;

use crate::auth::{AuthStrategy, PersonalAccessToken};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{GitHubError, Result};
use crate::pagination::Paginator;
use crate::transport::{Transport, TransportConfig};

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) auth: Box<dyn AuthStrategy>,
  pub(crate) transport: Transport,
  pub(crate) sink: Arc<dyn DiagnosticSink>,
}

impl GitHubClient {
  /// Create a client for the public GitHub API with default timeouts.
  pub fn new(auth: impl AuthStrategy + 'static) -> Result<Self> {
    Self::with_config(auth, &TransportConfig::default())
  }

  /// Create a client with a custom transport configuration.
  pub fn with_config(auth: impl AuthStrategy + 'static, config: &TransportConfig) -> Result<Self> {
    Ok(Self::with_transport(auth, Transport::new(config)?))
  }

  /// Create a client around an existing transport.
  pub fn with_transport(auth: impl AuthStrategy + 'static, transport: Transport) -> Self {
    Self {
      auth: Box::new(auth),
      transport,
      sink: Arc::new(TracingSink),
    }
  }

  /// Replace the sink that receives failure diagnostics.
  pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
    self.sink = sink;
    self
  }

  /// The API root this client talks to.
  pub fn base_url(&self) -> &str {
    self.transport.base_url()
  }

  /// Headers for a request, as produced by the auth strategy.
  pub(crate) fn headers(&self) -> HeaderMap {
    self.auth.headers()
  }

  /// GET an absolute URL with the default headers.
  pub(crate) fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
    self.transport.get(url, self.headers(), query)
  }

  pub(crate) fn paginator(&self) -> Paginator<'_> {
    Paginator::new(&self.transport, self.headers())
  }

  /// Report a failure to the diagnostic sink.
  pub(crate) fn report(&self, operation: &'static str, endpoint: &str, error: &GitHubError) {
    self.sink.report(&Diagnostic::from_error(operation, endpoint, error));
  }

  /// Convert a result into an option, reporting the failure.
  pub(crate) fn absorb<T>(&self, operation: &'static str, endpoint: &str, result: Result<T>) -> Option<T> {
    match result {
      Ok(value) => Some(value),
      Err(error) => {
        self.report(operation, endpoint, &error);
        None
      }
    }
  }
}

impl fmt::Debug for GitHubClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GitHubClient")
      .field("base_url", &self.transport.base_url())
      .finish_non_exhaustive()
  }
}

/// Create a GitHub client from a personal access token
///
/// # Errors
///
/// Fails with [`GitHubError::InvalidCredential`] when the token is empty.
pub fn create_github_client(token: &str) -> Result<GitHubClient> {
  GitHubClient::new(PersonalAccessToken::new(token)?)
}

#[cfg(test)]
pub(crate) mod testing {
  use super::*;
  use crate::diagnostics::CollectingSink;

  /// A client pointed at a mock server that records its diagnostics.
  pub(crate) fn test_client(base_url: &str, sink: &Arc<CollectingSink>) -> GitHubClient {
    let auth = PersonalAccessToken::new("test_token").unwrap();
    let config = TransportConfig::default().with_base_url(base_url);
    GitHubClient::with_config(auth, &config).unwrap().with_sink(sink.clone())
  }

  /// Run blocking client code off the async test runtime.
  pub(crate) async fn blocking<T, F>(f: F) -> T
  where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
  {
    tokio::task::spawn_blocking(f).await.unwrap()
  }
}
