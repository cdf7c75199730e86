//! Test doubles for the network and presentation seams.
//!
//! Compiled for unit tests and behind the `mock` feature so host crates can
//! drive a [`SyncController`](crate::core::SyncController) without a browser.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::Presenter;
use crate::core::error::FetchError;
use crate::models::MetadataBlock;
use crate::utils::runtime::sleep;
use crate::utils::{HttpClient, HttpResponse};

// =============================================================================
// StubClient
// =============================================================================

#[derive(Clone)]
struct Route {
    result: Result<HttpResponse, FetchError>,
    delay_ms: u32,
}

/// Scripted [`HttpClient`]: answers registered URLs, 404s everything else.
#[derive(Default)]
pub struct StubClient {
    routes: RefCell<HashMap<String, Route>>,
    requests: RefCell<Vec<String>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 JSON response.
    pub fn json(&self, url: &str, body: serde_json::Value) {
        self.respond(url, 200, Some("application/json"), &body.to_string());
    }

    /// Answer `url` with an arbitrary response.
    pub fn respond(&self, url: &str, status: u16, content_type: Option<&str>, body: &str) {
        let response = HttpResponse {
            status,
            content_type: content_type.map(String::from),
            body: body.to_string(),
        };
        self.set(url, Ok(response));
    }

    /// Fail requests to `url` at the transport level.
    pub fn fail(&self, url: &str, err: FetchError) {
        self.set(url, Err(err));
    }

    /// Hold the response to `url` for `ms` milliseconds.
    pub fn delay(&self, url: &str, ms: u32) {
        if let Some(route) = self.routes.borrow_mut().get_mut(url) {
            route.delay_ms = ms;
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn set(&self, url: &str, result: Result<HttpResponse, FetchError>) {
        let mut routes = self.routes.borrow_mut();
        let delay_ms = routes.get(url).map(|r| r.delay_ms).unwrap_or(0);
        routes.insert(url.to_string(), Route { result, delay_ms });
    }
}

impl HttpClient for StubClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        let route = self.routes.borrow().get(url).cloned();

        match route {
            Some(route) => {
                if route.delay_ms > 0 {
                    sleep(route.delay_ms).await;
                }
                route.result
            }
            None => Ok(HttpResponse {
                status: 404,
                content_type: Some("text/html".to_string()),
                body: "Not Found".to_string(),
            }),
        }
    }
}

// =============================================================================
// RecordingPresenter
// =============================================================================

/// A presentation call observed by [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq)]
pub enum Shown {
    Block(MetadataBlock),
    Hidden,
}

/// [`Presenter`] that records every call.
#[derive(Default)]
pub struct RecordingPresenter {
    calls: RefCell<Vec<Shown>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Shown> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Option<Shown> {
        self.calls.borrow().last().cloned()
    }

    /// Values of `key` in every block shown so far, as display strings.
    pub fn shown_values(&self, key: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Shown::Block(block) => block.structured.get(key).map(|v| v.to_string()),
                Shown::Hidden => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&self, block: &MetadataBlock) {
        self.calls.borrow_mut().push(Shown::Block(block.clone()));
    }

    fn hide(&self) {
        self.calls.borrow_mut().push(Shown::Hidden);
    }
}
