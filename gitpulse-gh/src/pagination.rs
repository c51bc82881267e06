//! Link-header pagination for GitHub collection endpoints.
//!
//! GitHub splits large collections across pages and advertises the following
//! page in the `Link` response header:
//!
//! `<https://api.github.com/user/repos?per_page=100&page=2>; rel="next", <...&page=5>; rel="last"`
//!
//! The [`Paginator`] walks those links until no `next` relation is left.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::GitHubError;
use crate::transport::{Transport, read_json};

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<([^>]*)>[^<]*?rel\s*=\s*"?([^";,]+)"?"#).expect("Failed to compile Link header regex")
});

/// Return the target of the `rel="next"` relation in a `Link` header.
pub fn next_link(link_header: &str) -> Option<String> {
  LINK_REGEX
    .captures_iter(link_header)
    .find(|captures| {
      captures[2]
        .split_whitespace()
        .any(|rel| rel.eq_ignore_ascii_case("next"))
    })
    .map(|captures| captures[1].to_string())
}

/// Items gathered from a paginated endpoint.
///
/// When a page fails the walk stops and `error` holds the failure; `items`
/// still contains everything gathered before it.
#[derive(Debug)]
pub struct Collected<T> {
  pub items: Vec<T>,
  /// Number of pages successfully decoded.
  pub pages: usize,
  pub error: Option<GitHubError>,
}

impl<T> Collected<T> {
  /// Whether every page was fetched.
  pub const fn is_complete(&self) -> bool {
    self.error.is_none()
  }

  /// Discard the completeness signal.
  pub fn into_items(self) -> Vec<T> {
    self.items
  }

  /// Apply `f` to every item, keeping the completeness signal.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Collected<U> {
    Collected {
      items: self.items.into_iter().map(f).collect(),
      pages: self.pages,
      error: self.error,
    }
  }
}

/// Walks `Link: rel="next"` chains with a fixed set of request headers.
pub struct Paginator<'a> {
  transport: &'a Transport,
  headers: HeaderMap,
}

impl<'a> Paginator<'a> {
  pub const fn new(transport: &'a Transport, headers: HeaderMap) -> Self {
    Self { transport, headers }
  }

  /// Fetch every page of `url`.
  ///
  /// `params` are sent with the first request only; the `next` links GitHub
  /// returns already carry them. Links are only followed on the transport's
  /// own origin. Never fails: a failing page or a foreign link ends the walk
  /// and is recorded in [`Collected::error`].
  pub fn fetch_all<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Collected<T> {
    let mut items = Vec::new();
    let mut pages = 0;
    let mut visited = HashSet::new();
    let mut next = Some(url.to_string());
    let mut query = params;

    while let Some(page_url) = next.take() {
      if !visited.insert(page_url.clone()) {
        warn!("Pagination of {} revisited {}, stopping", url, page_url);
        break;
      }

      let response = match self.transport.get(&page_url, self.headers.clone(), query) {
        Ok(response) => response,
        Err(error) => return Collected { items, pages, error: Some(error) },
      };

      let link = response
        .headers()
        .get(header::LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(next_link);

      match read_json::<Vec<T>>(&page_url, response) {
        Ok(page) => {
          pages += 1;
          debug!("Fetched page {} of {} with {} items", pages, url, page.len());
          items.extend(page);
        }
        Err(error) => return Collected { items, pages, error: Some(error) },
      }

      if let Some(link) = &link {
        if !self.transport.is_same_origin(link) {
          warn!("Pagination of {} linked off the API origin to {}, stopping", url, link);
          let error = GitHubError::UntrustedLink {
            url: page_url,
            link: link.clone(),
          };
          return Collected { items, pages, error: Some(error) };
        }
      }

      next = link;
      query = &[];
    }

    Collected {
      items,
      pages,
      error: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_next_link_full_header() {
    let header = r#"<https://api.github.com/user/repos?per_page=100&page=2>; rel="next", <https://api.github.com/user/repos?per_page=100&page=3>; rel="last""#;
    assert_eq!(
      next_link(header),
      Some("https://api.github.com/user/repos?per_page=100&page=2".to_string())
    );
  }

  #[test]
  fn test_next_link_not_first_relation() {
    let header = r#"<https://api.github.com/user/repos?page=1>; rel="prev", <https://api.github.com/user/repos?page=3>; rel="next""#;
    assert_eq!(
      next_link(header),
      Some("https://api.github.com/user/repos?page=3".to_string())
    );
  }

  #[test]
  fn test_next_link_last_page() {
    let header = r#"<https://api.github.com/user/repos?page=1>; rel="first", <https://api.github.com/user/repos?page=2>; rel="prev""#;
    assert_eq!(next_link(header), None);
  }

  #[test]
  fn test_next_link_unquoted_and_spaced() {
    let header = "<https://example.com/items?page=2> ;  rel=next";
    assert_eq!(next_link(header), Some("https://example.com/items?page=2".to_string()));
  }

  #[test]
  fn test_next_link_multiple_relations() {
    let header = r#"<https://example.com/items?page=2>; rel="next last""#;
    assert_eq!(next_link(header), Some("https://example.com/items?page=2".to_string()));
  }

  #[test]
  fn test_next_link_empty() {
    assert_eq!(next_link(""), None);
    assert_eq!(next_link("garbage"), None);
  }

  #[test]
  fn test_collected_map_keeps_error() {
    let collected = Collected {
      items: vec![1, 2, 3],
      pages: 1,
      error: Some(GitHubError::MissingLogin),
    };
    assert!(!collected.is_complete());

    let doubled = collected.map(|n| n * 2);
    assert_eq!(doubled.items, vec![2, 4, 6]);
    assert_eq!(doubled.pages, 1);
    assert!(!doubled.is_complete());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_fetch_all_stops_on_revisited_link() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::transport::TransportConfig;

    let mock_server = MockServer::start().await;
    let self_link = format!("<{}/loop>; rel=\"next\"", mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/loop"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!([1, 2]))
          .insert_header("Link", self_link.as_str()),
      )
      .expect(1)
      .mount(&mock_server)
      .await;

    let uri = mock_server.uri();
    let collected = tokio::task::spawn_blocking(move || {
      let transport = Transport::new(&TransportConfig::default().with_base_url(uri.as_str())).unwrap();
      Paginator::new(&transport, HeaderMap::new()).fetch_all::<u32>(&transport.endpoint("/loop"), &[])
    })
    .await
    .unwrap();

    assert_eq!(collected.items, vec![1, 2]);
    assert_eq!(collected.pages, 1);
    assert!(collected.is_complete());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_fetch_all_decode_failure_keeps_earlier_pages() {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::transport::TransportConfig;

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .and(query_param("per_page", "100"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!([1]))
          .insert_header("Link", format!("<{}/items?page=2>; rel=\"next\"", mock_server.uri()).as_str()),
      )
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .and(query_param("page", "2"))
      .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
      .mount(&mock_server)
      .await;

    let uri = mock_server.uri();
    let collected = tokio::task::spawn_blocking(move || {
      let transport = Transport::new(&TransportConfig::default().with_base_url(uri.as_str())).unwrap();
      let url = transport.endpoint("/items");
      Paginator::new(&transport, HeaderMap::new()).fetch_all::<u32>(&url, &[("per_page", "100")])
    })
    .await
    .unwrap();

    assert_eq!(collected.items, vec![1]);
    assert!(matches!(collected.error, Some(GitHubError::Decode { .. })));
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_fetch_all_does_not_follow_foreign_link() {
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::{AuthStrategy, PersonalAccessToken};
    use crate::transport::TransportConfig;

    let api_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!([1, 2]))
          .insert_header("Link", format!("<{}/items?page=2>; rel=\"next\"", other_server.uri()).as_str()),
      )
      .expect(1)
      .mount(&api_server)
      .await;

    Mock::given(method("GET"))
      .and(header_exists("Authorization"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([3])))
      .expect(0)
      .mount(&other_server)
      .await;

    let uri = api_server.uri();
    let collected = tokio::task::spawn_blocking(move || {
      let transport = Transport::new(&TransportConfig::default().with_base_url(uri.as_str())).unwrap();
      let headers = PersonalAccessToken::new("test_token").unwrap().headers();
      let url = transport.endpoint("/items");
      Paginator::new(&transport, headers).fetch_all::<u32>(&url, &[])
    })
    .await
    .unwrap();

    assert_eq!(collected.items, vec![1, 2]);
    assert_eq!(collected.pages, 1);
    assert!(matches!(collected.error, Some(GitHubError::UntrustedLink { .. })));
    assert!(other_server.received_requests().await.unwrap().is_empty());
  }
}
