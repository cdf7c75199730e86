//! Application configuration.
//!
//! Centralizes the constants used throughout the crate and the runtime
//! [`SyncConfig`] built from them.

use serde::Deserialize;

// =============================================================================
// Document Format
// =============================================================================

/// Marker line that opens and closes the metadata block.
pub const BLOCK_MARKER: &str = "---";

/// Length of a canonical page identifier (hex characters).
pub const CANONICAL_ID_LEN: usize = 24;

// =============================================================================
// Network Configuration
// =============================================================================

/// Endpoint path prefixes tried in order when fetching a page.
pub const DEFAULT_ENDPOINT_PREFIXES: &[&str] = &["/_api/v3", "/api/v3"];

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10_000;

/// Query parameter that selects a historical revision.
pub const REVISION_QUERY_PARAM: &str = "revisionId";

// =============================================================================
// Navigation Configuration
// =============================================================================

/// Upper bound for waiting on a provisional address to become canonical.
pub const STABILIZE_TIMEOUT_MS: u32 = 1_500;

/// Interval between address polls while stabilizing.
pub const STABILIZE_POLL_MS: u32 = 50;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

/// Runtime settings for a [`SyncController`](crate::core::SyncController).
///
/// Every field is optional in serialized form; missing fields fall back to
/// the constants above.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Origin prepended to every endpoint (empty for same-origin requests).
    pub base_url: String,
    /// Endpoint path prefixes, tried in order.
    pub endpoint_prefixes: Vec<String>,
    /// Stabilization wait bound in milliseconds.
    pub stabilize_timeout_ms: u32,
    /// Stabilization poll interval in milliseconds.
    pub stabilize_poll_ms: u32,
    /// Per-request timeout in milliseconds (browser client only).
    pub fetch_timeout_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint_prefixes: DEFAULT_ENDPOINT_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            stabilize_timeout_ms: STABILIZE_TIMEOUT_MS,
            stabilize_poll_ms: STABILIZE_POLL_MS,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl SyncConfig {
    /// Parse a TOML document into a config, filling gaps with defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}
