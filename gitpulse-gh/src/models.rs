//! Records returned by the GitHub client.
//!
//! GitHub objects are kept verbatim as JSON maps; the client reads only the
//! handful of fields it needs (such as a user's `login`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GitHubError;

/// The authenticated user's profile, as returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub Map<String, Value>);

impl UserProfile {
  /// The user's login, if the profile has one.
  pub fn login(&self) -> Option<&str> {
    self.0.get("login").and_then(Value::as_str)
  }

  /// Look up any other field.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }
}

/// A repository as returned by `GET /user/repos` or `GET /repos/{owner}/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository(pub Map<String, Value>);

/// A single repository fetched by name.
pub type RepoDetail = Repository;

impl Repository {
  /// `owner/name` of the repository.
  pub fn full_name(&self) -> Option<&str> {
    self.0.get("full_name").and_then(Value::as_str)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }
}

/// A commit stamped with the repository it was fetched from.
///
/// Serializes as the provider's commit object with an extra `repository`
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
  /// `owner/name` reference the commit came from.
  pub repository: String,
  #[serde(flatten)]
  pub data: Map<String, Value>,
}

impl CommitRecord {
  /// Stamp a provider commit object with its repository.
  pub fn new(repository: impl Into<String>, data: Map<String, Value>) -> Self {
    Self {
      repository: repository.into(),
      data,
    }
  }

  pub fn sha(&self) -> Option<&str> {
    self.data.get("sha").and_then(Value::as_str)
  }

  /// First line of the commit message.
  pub fn subject(&self) -> Option<&str> {
    self
      .data
      .get("commit")
      .and_then(|commit| commit.get("message"))
      .and_then(Value::as_str)
      .and_then(|message| message.lines().next())
  }

  /// Name recorded as the git author of the commit.
  pub fn author_name(&self) -> Option<&str> {
    self
      .data
      .get("commit")
      .and_then(|commit| commit.get("author"))
      .and_then(|author| author.get("name"))
      .and_then(Value::as_str)
  }
}

/// A repository whose commits were not (fully) collected.
#[derive(Debug)]
pub struct SkippedRepo {
  pub repository: String,
  pub error: GitHubError,
}

/// Result of aggregating recent commits across repositories.
#[derive(Debug, Default)]
pub struct RecentCommits {
  /// Commits in repository order, then provider order.
  pub commits: Vec<CommitRecord>,
  /// Repositories that failed, in the order they were visited.
  pub skipped: Vec<SkippedRepo>,
}

impl RecentCommits {
  /// Whether every repository was fetched completely.
  pub fn is_complete(&self) -> bool {
    self.skipped.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      other => panic!("expected object, got {other}"),
    }
  }

  #[test]
  fn test_user_profile_login() {
    let user: UserProfile = serde_json::from_value(json!({
        "login": "octocat",
        "id": 1,
        "name": "The Octocat"
    }))
    .unwrap();

    assert_eq!(user.login(), Some("octocat"));
    assert_eq!(user.get("id"), Some(&json!(1)));
  }

  #[test]
  fn test_user_profile_without_login() {
    let user: UserProfile = serde_json::from_value(json!({ "id": 1 })).unwrap();
    assert_eq!(user.login(), None);

    let user: UserProfile = serde_json::from_value(json!({ "login": 42 })).unwrap();
    assert_eq!(user.login(), None);
  }

  #[test]
  fn test_user_profile_round_trips_verbatim() {
    let raw = json!({ "login": "octocat", "plan": { "name": "pro" } });
    let user: UserProfile = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(serde_json::to_value(&user).unwrap(), raw);
  }

  #[test]
  fn test_repository_full_name() {
    let repo: Repository = serde_json::from_value(json!({
        "id": 1296269,
        "name": "Hello-World",
        "full_name": "octocat/Hello-World",
        "private": false
    }))
    .unwrap();

    assert_eq!(repo.full_name(), Some("octocat/Hello-World"));
    assert_eq!(repo.get("private"), Some(&json!(false)));
  }

  #[test]
  fn test_commit_record_accessors() {
    let commit = CommitRecord::new(
      "octocat/Hello-World",
      object(json!({
          "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
          "commit": {
              "message": "Fix all the bugs\n\nLonger description",
              "author": { "name": "Monalisa Octocat", "date": "2011-04-14T16:00:49Z" }
          }
      })),
    );

    assert_eq!(commit.repository, "octocat/Hello-World");
    assert_eq!(commit.sha(), Some("6dcb09b5b57875f334f61aebed695e2e4193db5e"));
    assert_eq!(commit.subject(), Some("Fix all the bugs"));
    assert_eq!(commit.author_name(), Some("Monalisa Octocat"));
  }

  #[test]
  fn test_commit_record_serializes_with_repository_field() {
    let commit = CommitRecord::new("c/d", object(json!({ "sha": "abc123" })));
    let value = serde_json::to_value(&commit).unwrap();

    assert_eq!(value, json!({ "repository": "c/d", "sha": "abc123" }));
  }

  #[test]
  fn test_recent_commits_completeness() {
    let mut recent = RecentCommits::default();
    assert!(recent.is_complete());

    recent.skipped.push(SkippedRepo {
      repository: "a/b".to_string(),
      error: GitHubError::NotFound {
        url: "https://api.github.com/repos/a/b/commits".to_string(),
      },
    });
    assert!(!recent.is_complete());
  }
}
