//! HTTP transport seam.
//!
//! [`HttpClient`] is the only network capability the crate consumes. The
//! browser implementation, [`WebClient`], uses the Fetch API and races each
//! request against a timeout.

use crate::core::error::FetchError;

/// A completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Value of the `Content-Type` header, if present
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the response declares a JSON media type.
    ///
    /// Accepts `application/json` and structured `+json` suffixes, ignoring
    /// parameters such as `charset`.
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            let essence = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
    }
}

/// Issues GET requests.
///
/// Futures are polled on a single-threaded executor, so implementations do
/// not need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl<T: HttpClient> HttpClient for std::rc::Rc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url).await
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebClient;

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::{Array, Promise};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::{HttpClient, HttpResponse};
    use crate::config::FETCH_TIMEOUT_MS;
    use crate::core::error::FetchError;

    // =========================================================================
    // Promise Racing Utilities
    // =========================================================================

    /// Result of a promise race with timeout.
    #[derive(Debug)]
    enum RaceResult {
        /// The promise completed before timeout.
        Completed(JsValue),
        /// Timeout occurred before promise completed.
        TimedOut,
        /// Promise rejected with an error.
        Error(String),
    }

    /// Race a promise against a timeout using `Promise.race`.
    async fn race_with_timeout(promise: Promise, timeout_ms: u32) -> RaceResult {
        let Some(window) = web_sys::window() else {
            return RaceResult::Error("Window not available".to_string());
        };

        // Resolves to undefined, which marks the timeout
        let timeout_promise = Promise::new(&mut |resolve, _| {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                &resolve,
                timeout_ms as i32,
            );
        });

        let race_array = Array::new();
        race_array.push(&promise);
        race_array.push(&timeout_promise);

        match JsFuture::from(Promise::race(&race_array)).await {
            Ok(result) if result.is_undefined() => RaceResult::TimedOut,
            Ok(result) => RaceResult::Completed(result),
            Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
        }
    }

    // =========================================================================
    // Browser Client
    // =========================================================================

    /// [`HttpClient`] backed by `window.fetch`.
    ///
    /// Requests are same-origin by default and carry the session cookies the
    /// host page already has.
    #[derive(Clone, Debug)]
    pub struct WebClient {
        timeout_ms: u32,
    }

    impl WebClient {
        pub fn new(timeout_ms: u32) -> Self {
            Self { timeout_ms }
        }
    }

    impl Default for WebClient {
        fn default() -> Self {
            Self::new(FETCH_TIMEOUT_MS)
        }
    }

    impl HttpClient for WebClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            let window = web_sys::window().ok_or(FetchError::NoWindow)?;

            let opts = RequestInit::new();
            opts.set_method("GET");
            opts.set_mode(RequestMode::Cors);

            let request = Request::new_with_str_and_init(url, &opts)
                .map_err(|_| FetchError::RequestCreationFailed)?;
            let _ = request.headers().set("Accept", "application/json");

            let fetch_promise = window.fetch_with_request(&request);

            let resp: Response = match race_with_timeout(fetch_promise, self.timeout_ms).await {
                RaceResult::TimedOut => return Err(FetchError::Timeout),
                RaceResult::Error(msg) => return Err(FetchError::Network(msg)),
                RaceResult::Completed(result) => result
                    .dyn_into()
                    .map_err(|_| FetchError::Network("not a Response".to_string()))?,
            };

            let content_type = resp.headers().get("content-type").ok().flatten();

            let text_promise = resp
                .text()
                .map_err(|_| FetchError::Network("failed to read response".to_string()))?;
            let body = JsFuture::from(text_promise)
                .await
                .map_err(|_| FetchError::Network("failed to read response".to_string()))?
                .as_string()
                .unwrap_or_default();

            Ok(HttpResponse {
                status: resp.status(),
                content_type,
                body,
            })
        }
    }
}
