//! Browser wiring.
//!
//! Builds a [`SyncController`] from the page's own history, the Fetch API
//! and a [`PanelState`], the way a host plugin mounts it.

use std::rc::Rc;

use crate::components::PanelState;
use crate::config::SyncConfig;
use crate::core::SyncController;
use crate::navigation::BrowserHistory;
use crate::utils::WebClient;

/// Controller bound to `window.history` and `window.fetch`.
pub type BrowserController = SyncController<BrowserHistory, WebClient, PanelState>;

/// Create a controller for the current page.
///
/// Returns `None` outside a browsing context. The caller decides when to
/// call `start` and `stop`.
pub fn browser_controller(panel: PanelState, config: SyncConfig) -> Option<BrowserController> {
    let history = Rc::new(BrowserHistory::new()?);
    let client = WebClient::new(config.fetch_timeout_ms);
    Some(SyncController::new(history, client, panel, config))
}
