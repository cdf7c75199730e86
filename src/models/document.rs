//! Documents, extracted metadata and controller state.

use serde::Serialize;

use super::{Address, Mapping};
use crate::core::error::FetchError;

/// Text body of a fetched document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument(pub String);

impl RawDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Metadata block found at the top of a document.
///
/// Only constructed from a block that was both delimited and parsed into
/// at least one key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetadataBlock {
    /// Trimmed text between the markers
    pub raw_text: String,
    /// Parsed entries, in document order
    pub structured: Mapping,
}

/// Result of fetching a document across all endpoint prefixes.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// A non-empty body was found
    Success(RawDocument),
    /// At least one endpoint answered, none carried a body
    Empty,
    /// Every endpoint failed; holds the last error seen
    Failure(FetchError),
}

/// State of a [`SyncController`](crate::core::SyncController).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ControllerState {
    /// Not started (or stopped)
    #[default]
    Idle,
    /// Waiting for the document at this address
    Fetching(Address),
    /// Showing the metadata of the current page
    Displaying(MetadataBlock),
    /// Current address has no metadata to show
    Hidden,
}

impl ControllerState {
    /// Whether the presentation layer should be visible.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Displaying(_))
    }

    pub fn block(&self) -> Option<&MetadataBlock> {
        match self {
            Self::Displaying(block) => Some(block),
            _ => None,
        }
    }
}
