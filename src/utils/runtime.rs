//! Single-threaded task primitives.
//!
//! In the browser, tasks run on the microtask queue through
//! `wasm_bindgen_futures` and timers come from `gloo-timers`. Natively they
//! run on tokio; [`spawn_local`] must then be called from inside a
//! `tokio::task::LocalSet`.

use std::future::Future;

/// Spawn a `!Send` future on the current thread's executor.
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Spawn a `!Send` future on the current thread's executor.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(future);
}

/// Suspend the current task for `ms` milliseconds.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

/// Suspend the current task for `ms` milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}
