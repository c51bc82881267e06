//! Structured reporting of failures swallowed at operation boundaries.
//!
//! Operations such as [`crate::UserFetcher::get_user`] never return an error
//! to their caller. Instead every failure is described by a [`Diagnostic`] and
//! handed to the client's [`DiagnosticSink`]. The default sink turns these into
//! `tracing` events; applications can install their own to collect or forward
//! them.

use std::sync::Mutex;

use tracing::warn;

use crate::error::{ErrorClass, GitHubError};

/// A single reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  /// Name of the client operation that failed (e.g. `get_recent_commits`).
  pub operation: &'static str,
  /// The endpoint or resource the failure concerns.
  pub endpoint: String,
  /// Classification of the failure.
  pub class: ErrorClass,
  /// Human readable description.
  pub message: String,
}

impl Diagnostic {
  /// Describe `error` raised while `operation` was working on `endpoint`.
  pub fn from_error(operation: &'static str, endpoint: impl Into<String>, error: &GitHubError) -> Self {
    Self {
      operation,
      endpoint: endpoint.into(),
      class: error.class(),
      message: error.to_string(),
    }
  }
}

/// Receives diagnostics from a client.
pub trait DiagnosticSink: Send + Sync {
  fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
  F: Fn(&Diagnostic) + Send + Sync,
{
  fn report(&self, diagnostic: &Diagnostic) {
    self(diagnostic)
  }
}

/// Emits each diagnostic as a `warn` level tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
  fn report(&self, diagnostic: &Diagnostic) {
    warn!(
      operation = diagnostic.operation,
      endpoint = %diagnostic.endpoint,
      class = %diagnostic.class,
      "{}",
      diagnostic.message
    );
  }
}

/// Keeps every diagnostic in memory, in the order it was reported.
#[derive(Debug, Default)]
pub struct CollectingSink {
  diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of everything reported so far.
  pub fn diagnostics(&self) -> Vec<Diagnostic> {
    self.diagnostics.lock().map(|d| d.clone()).unwrap_or_default()
  }

  /// Diagnostics of a single class.
  pub fn of_class(&self, class: ErrorClass) -> Vec<Diagnostic> {
    self.diagnostics().into_iter().filter(|d| d.class == class).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.diagnostics().is_empty()
  }
}

impl DiagnosticSink for CollectingSink {
  fn report(&self, diagnostic: &Diagnostic) {
    if let Ok(mut diagnostics) = self.diagnostics.lock() {
      diagnostics.push(diagnostic.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;

  fn not_found(url: &str) -> GitHubError {
    GitHubError::NotFound { url: url.to_string() }
  }

  #[test]
  fn test_diagnostic_from_error() {
    let diagnostic = Diagnostic::from_error("get_repo_details", "a/b", &not_found("https://api.github.com/repos/a/b"));

    assert_eq!(diagnostic.operation, "get_repo_details");
    assert_eq!(diagnostic.endpoint, "a/b");
    assert_eq!(diagnostic.class, ErrorClass::NotFound);
    assert!(diagnostic.message.contains("/repos/a/b"));
  }

  #[test]
  fn test_collecting_sink_keeps_order_and_filters() {
    let sink = CollectingSink::new();
    assert!(sink.is_empty());

    sink.report(&Diagnostic::from_error("op", "first", &not_found("u1")));
    sink.report(&Diagnostic::from_error("op", "second", &GitHubError::MissingLogin));
    sink.report(&Diagnostic::from_error("op", "third", &not_found("u3")));

    let all = sink.diagnostics();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].endpoint, "first");
    assert_eq!(all[2].endpoint, "third");

    let missing = sink.of_class(ErrorClass::NotFound);
    assert_eq!(missing.len(), 2);
  }

  #[test]
  fn test_closure_sink() {
    let count = AtomicUsize::new(0);
    let sink = |_: &Diagnostic| {
      count.fetch_add(1, Ordering::SeqCst);
    };

    sink.report(&Diagnostic::from_error("op", "x", &GitHubError::MissingLogin));
    sink.report(&Diagnostic::from_error("op", "y", &GitHubError::MissingLogin));
    assert_eq!(count.load(Ordering::SeqCst), 2);
  }
}
