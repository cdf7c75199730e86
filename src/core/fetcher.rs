//! Document retrieval from the wiki backend.
//!
//! Each endpoint prefix is tried in order until one yields a non-empty
//! body. Failures never escape: they are logged and the next prefix is
//! tried.
//!
//! | Mode     | Path                                  | Body at                                          |
//! |----------|---------------------------------------|--------------------------------------------------|
//! | page     | `{prefix}/page?pageId=<id>`           | `page.revision.body`, `data.page.revision.body`  |
//! | revision | `{prefix}/pages/<id>/revisions/<rev>` | `revision.body`, `data.revision.body`            |

use log::warn;
use url::form_urlencoded;

use super::error::FetchError;
use crate::config::SyncConfig;
use crate::models::{FetchOutcome, RawDocument};
use crate::utils::HttpClient;

/// JSON pointers probed for a page body, in order.
const PAGE_BODY_POINTERS: &[&str] = &["/page/revision/body", "/data/page/revision/body"];

/// JSON pointers probed for a revision body, in order.
const REVISION_BODY_POINTERS: &[&str] = &["/revision/body", "/data/revision/body"];

/// Fetches raw document bodies through an [`HttpClient`].
pub struct DocumentFetcher<C> {
    client: C,
    base_url: String,
    prefixes: Vec<String>,
}

impl<C: HttpClient> DocumentFetcher<C> {
    pub fn new(client: C, base_url: impl Into<String>, prefixes: Vec<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefixes,
        }
    }

    pub fn from_config(client: C, config: &SyncConfig) -> Self {
        Self::new(
            client,
            config.base_url.clone(),
            config.endpoint_prefixes.clone(),
        )
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch the current body of `page_id`, or a specific revision of it.
    ///
    /// Returns [`FetchOutcome::Failure`] only when every prefix failed with
    /// an error; if any prefix answered without a body the outcome is
    /// [`FetchOutcome::Empty`].
    pub async fn fetch(&self, page_id: &str, revision_id: Option<&str>) -> FetchOutcome {
        let mut answered = false;
        let mut last_error = None;

        for prefix in &self.prefixes {
            let (url, pointers) = match revision_id {
                Some(rev) => (self.revision_url(prefix, page_id, rev), REVISION_BODY_POINTERS),
                None => (self.page_url(prefix, page_id), PAGE_BODY_POINTERS),
            };

            match self.fetch_body(&url, pointers).await {
                Ok(body) => return FetchOutcome::Success(RawDocument(body)),
                Err(FetchError::MissingBody) => {
                    warn!("{}: {}", url, FetchError::MissingBody);
                    answered = true;
                }
                Err(err) => {
                    warn!("{}: {}", url, err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if !answered => FetchOutcome::Failure(err),
            _ => FetchOutcome::Empty,
        }
    }

    async fn fetch_body(&self, url: &str, pointers: &[&str]) -> Result<String, FetchError> {
        let resp = self.client.get(url).await?;

        if !resp.ok() {
            return Err(FetchError::HttpStatus(resp.status));
        }
        if !resp.is_json() {
            return Err(FetchError::NonJsonResponse(resp.content_type));
        }

        let json: serde_json::Value =
            serde_json::from_str(&resp.body).map_err(|e| FetchError::Decode(e.to_string()))?;

        pointers
            .iter()
            .filter_map(|pointer| json.pointer(pointer))
            .filter_map(serde_json::Value::as_str)
            .find(|body| !body.is_empty())
            .map(String::from)
            .ok_or(FetchError::MissingBody)
    }

    fn page_url(&self, prefix: &str, page_id: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("pageId", page_id)
            .finish();
        format!("{}{}/page?{}", self.base_url, prefix, query)
    }

    fn revision_url(&self, prefix: &str, page_id: &str, revision_id: &str) -> String {
        format!(
            "{}{}/pages/{}/revisions/{}",
            self.base_url,
            prefix,
            encode_segment(page_id),
            encode_segment(revision_id)
        )
    }
}

fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::testing::StubClient;

    const ID: &str = "6999390af17c96c558f7d57e";

    fn fetcher(client: &Rc<StubClient>) -> DocumentFetcher<Rc<StubClient>> {
        DocumentFetcher::new(
            Rc::clone(client),
            "",
            vec!["/_api/v3".to_string(), "/api/v3".to_string()],
        )
    }

    fn page_url(prefix: &str) -> String {
        format!("{}/page?pageId={}", prefix, ID)
    }

    #[tokio::test]
    async fn test_falls_back_to_second_prefix() {
        let client = Rc::new(StubClient::new());
        client.respond(&page_url("/_api/v3"), 404, Some("text/html"), "Not Found");
        client.json(
            &page_url("/api/v3"),
            json!({ "data": { "page": { "revision": { "body": "---\na: 1\n---" } } } }),
        );

        let outcome = fetcher(&client).fetch(ID, None).await;

        assert_eq!(
            outcome,
            FetchOutcome::Success(RawDocument("---\na: 1\n---".to_string()))
        );
        assert_eq!(client.requests(), vec![page_url("/_api/v3"), page_url("/api/v3")]);
    }

    #[tokio::test]
    async fn test_first_prefix_wins() {
        let client = Rc::new(StubClient::new());
        client.json(
            &page_url("/_api/v3"),
            json!({ "page": { "revision": { "body": "first" } } }),
        );
        client.json(
            &page_url("/api/v3"),
            json!({ "page": { "revision": { "body": "second" } } }),
        );

        let outcome = fetcher(&client).fetch(ID, None).await;

        assert_eq!(outcome, FetchOutcome::Success(RawDocument("first".to_string())));
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_errors_and_non_json_are_skipped() {
        let client = Rc::new(StubClient::new());
        client.fail(&page_url("/_api/v3"), FetchError::Network("refused".into()));
        client.respond(&page_url("/api/v3"), 200, Some("text/html"), "<html>");

        let outcome = fetcher(&client).fetch(ID, None).await;

        assert_eq!(
            outcome,
            FetchOutcome::Failure(FetchError::NonJsonResponse(Some("text/html".into())))
        );
    }

    #[tokio::test]
    async fn test_missing_body_is_empty() {
        let client = Rc::new(StubClient::new());
        client.json(&page_url("/_api/v3"), json!({ "page": { "revision": { "body": "" } } }));
        client.respond(&page_url("/api/v3"), 200, Some("application/json"), "{not json");

        assert_eq!(fetcher(&client).fetch(ID, None).await, FetchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_unpopulated_revision_reference_is_tolerated() {
        let client = Rc::new(StubClient::new());
        // Some backends return the revision as a bare id string
        client.json(&page_url("/_api/v3"), json!({ "page": { "revision": "abc123" } }));
        client.json(
            &page_url("/api/v3"),
            json!({ "page": { "revision": { "body": "ok" } } }),
        );

        assert_eq!(
            fetcher(&client).fetch(ID, None).await,
            FetchOutcome::Success(RawDocument("ok".to_string()))
        );
    }

    #[tokio::test]
    async fn test_revision_envelopes() {
        let client = Rc::new(StubClient::new());
        let direct = format!("/_api/v3/pages/{}/revisions/r1", ID);
        let nested = format!("/api/v3/pages/{}/revisions/r2", ID);
        client.json(&direct, json!({ "revision": { "body": "direct" } }));
        client.respond(&format!("/_api/v3/pages/{}/revisions/r2", ID), 500, None, "");
        client.json(&nested, json!({ "data": { "revision": { "body": "nested" } } }));

        let fetcher = fetcher(&client);
        assert_eq!(
            fetcher.fetch(ID, Some("r1")).await,
            FetchOutcome::Success(RawDocument("direct".to_string()))
        );
        assert_eq!(
            fetcher.fetch(ID, Some("r2")).await,
            FetchOutcome::Success(RawDocument("nested".to_string()))
        );
    }

    #[tokio::test]
    async fn test_revision_page_envelope_is_not_accepted() {
        let client = Rc::new(StubClient::new());
        client.json(
            &format!("/_api/v3/pages/{}/revisions/r1", ID),
            json!({ "page": { "revision": { "body": "wrong shape" } } }),
        );

        assert_eq!(fetcher(&client).fetch(ID, Some("r1")).await, FetchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_all_prefixes_failing() {
        let client = Rc::new(StubClient::new());

        assert_eq!(
            fetcher(&client).fetch(ID, None).await,
            FetchOutcome::Failure(FetchError::HttpStatus(404))
        );
    }

    #[test]
    fn test_urls_are_encoded() {
        let client = Rc::new(StubClient::new());
        let fetcher = DocumentFetcher::new(client, "https://wiki.example.org/", vec![]);
        assert_eq!(
            fetcher.page_url("/_api/v3", "a b&c"),
            "https://wiki.example.org/_api/v3/page?pageId=a+b%26c"
        );
        assert_eq!(
            fetcher.revision_url("/api/v3", ID, "r/1"),
            format!("https://wiki.example.org/api/v3/pages/{}/revisions/r%2F1", ID)
        );
    }
}
