//! Front-matter metadata for single-page wiki hosts.
//!
//! Extracts the `---`-delimited metadata block at the top of a page and
//! keeps a presentation layer in sync with it while the host navigates via
//! history mutation.
//!
//! ```ignore
//! let panel = PanelState::new();
//! let controller = app::browser_controller(panel, SyncConfig::default())?;
//! controller.start();
//! ```

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod navigation;
#[cfg(any(test, feature = "mock"))]
pub mod testing;
pub mod utils;

pub use components::PanelState;
pub use config::SyncConfig;
pub use crate::core::{Presenter, SyncController};
pub use models::{Address, ControllerState, Mapping, MetadataBlock, Value};
