//! Core logic: parsing, extraction, fetching and synchronization.
//!
//! This module provides:
//! - [`markup`] - The metadata dialect parser and renderer
//! - [`frontmatter`] - Leading metadata block extraction
//! - [`DocumentFetcher`] - Multi-prefix, multi-envelope document retrieval
//! - [`SyncController`], [`Presenter`] - Navigation-driven state machine

mod controller;
pub mod error;
mod fetcher;
pub mod frontmatter;
pub mod markup;

pub use controller::{Presenter, SyncController};
pub use fetcher::DocumentFetcher;
