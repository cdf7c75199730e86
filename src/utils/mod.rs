//! Host, network and runtime utilities.
//!
//! Provides:
//! - [`HttpClient`], [`HttpResponse`] - Network seam (browser: `WebClient`)
//! - [`runtime`] - `spawn_local` and `sleep` for the single-threaded executor
//! - [`logging`] - Console logger for the `log` facade

mod fetch;
pub mod logging;
pub mod runtime;

#[cfg(target_arch = "wasm32")]
pub use fetch::WebClient;
pub use fetch::{HttpClient, HttpResponse};
