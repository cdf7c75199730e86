//! Data models and types for the crate.
//!
//! Contains domain types for:
//! - [`Address`], [`NavigationEvent`] - Host navigation state
//! - [`Mapping`], [`Value`] - Parsed metadata entries
//! - [`RawDocument`], [`MetadataBlock`], [`FetchOutcome`] - Fetch and extraction results
//! - [`ControllerState`] - Synchronization state machine

mod address;
mod document;
mod mapping;

pub use address::{Address, NavigationEvent};
pub use document::{ControllerState, FetchOutcome, MetadataBlock, RawDocument};
pub use mapping::{Mapping, Value};
