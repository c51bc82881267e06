//! Fake GitHub collection endpoints for `wiremock` based tests
//!
//! GitHub paginates collections through `Link: <url>; rel="next"` headers.
//! These helpers build pages and mount them on a [`MockServer`] so that the
//! first request is matched by its query parameters and every following page
//! by the `page` parameter carried in the previous page's `next` link.

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `Link` header value pointing at `url` as the next page
pub fn link_next(url: &str) -> String {
  format!(r#"<{url}>; rel="next""#)
}

/// Absolute URL of page `page` of `route` on `server`
pub fn page_url(server: &MockServer, route: &str, page: usize) -> String {
  format!("{}{}?page={}", server.uri(), route, page)
}

/// A 200 response carrying `body`, linking to `next` when given
pub fn page_response(body: &Value, next: Option<&str>) -> ResponseTemplate {
  let template = ResponseTemplate::new(200).set_body_json(body);
  match next {
    Some(next) => template.insert_header("Link", link_next(next)),
    None => template,
  }
}

/// `count` repository objects with ids starting at `start`
pub fn repo_page(start: usize, count: usize) -> Value {
  Value::Array(
    (start..start + count)
      .map(|id| {
        json!({
          "id": id,
          "name": format!("repo-{id}"),
          "full_name": format!("owner/repo-{id}"),
          "private": false
        })
      })
      .collect(),
  )
}

/// Commit objects, one per sha, in the given order
pub fn commit_list(shas: &[&str]) -> Value {
  Value::Array(
    shas
      .iter()
      .map(|sha| {
        json!({
          "sha": sha,
          "commit": {
            "message": format!("Commit {sha}\n\nBody"),
            "author": { "name": "Test User", "date": "2024-01-01T12:00:00Z" }
          }
        })
      })
      .collect(),
  )
}

/// Mount `pages` as a paginated collection at `route`
///
/// The first page only matches requests carrying `first_param`; page `n`
/// (n >= 2) only matches `?page=n`. Every page expects exactly one request.
pub async fn mount_pages(server: &MockServer, route: &str, first_param: (&str, &str), pages: &[Value]) {
  for (index, body) in pages.iter().enumerate() {
    let number = index + 1;
    let next = (number < pages.len()).then(|| page_url(server, route, number + 1));

    let mock = Mock::given(method("GET")).and(path(route));
    let mock = if number == 1 {
      mock.and(query_param(first_param.0, first_param.1))
    } else {
      mock.and(query_param("page", number.to_string()))
    };

    mock
      .respond_with(page_response(body, next.as_deref()))
      .expect(1)
      .mount(server)
      .await;
  }
}
