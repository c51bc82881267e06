//! Authentication strategies for the GitHub client.
//!
//! A strategy owns a credential and turns it into the headers every request
//! must carry. The client only ever sees the [`AuthStrategy`] trait, so new
//! kinds of credentials can be added here without touching request code.

use std::fmt;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::consts::ACCEPT;
use crate::error::{GitHubError, Result};

/// Produces the headers that authenticate a request.
pub trait AuthStrategy: Send + Sync {
  /// Headers to send with every request. Must be deterministic.
  fn headers(&self) -> HeaderMap;
}

/// A non-empty secret used to authenticate against GitHub.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
  /// Validate and wrap a secret.
  pub fn new(secret: impl Into<String>) -> Result<Self> {
    let secret = secret.into();
    if secret.is_empty() {
      return Err(GitHubError::InvalidCredential(
        "GitHub credential cannot be empty".to_string(),
      ));
    }
    Ok(Self(secret))
  }

  /// The raw secret.
  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Credential(***)")
  }
}

/// Personal access token authentication (`Authorization: token <pat>`).
#[derive(Debug, Clone)]
pub struct PersonalAccessToken {
  credential: Credential,
  authorization: HeaderValue,
}

impl PersonalAccessToken {
  /// Create a strategy from a token, failing fast on empty or malformed input.
  pub fn new(token: impl Into<String>) -> Result<Self> {
    let credential = Credential::new(token)?;
    let mut authorization = HeaderValue::from_str(&format!("token {}", credential.expose())).map_err(|_| {
      GitHubError::InvalidCredential("GitHub credential contains characters not allowed in a header".to_string())
    })?;
    authorization.set_sensitive(true);

    Ok(Self {
      credential,
      authorization,
    })
  }

  /// The credential this strategy was built from.
  pub fn credential(&self) -> &Credential {
    &self.credential
  }
}

impl AuthStrategy for PersonalAccessToken {
  fn headers(&self) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(header::AUTHORIZATION, self.authorization.clone());
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers
  }
}
