//! Error types for the fetch and extraction pipeline.
//!
//! None of these are fatal. They are logged and collapsed into "try the next
//! endpoint" or "no metadata" at the component boundaries:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ExtractError`] - Reasons a document carries no usable metadata block

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Transport failure (connection refused, CORS, aborted read)
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpStatus(u16),
    /// Response did not declare a JSON content type
    #[error("Expected JSON response, got {}", .0.as_deref().unwrap_or("no content type"))]
    NonJsonResponse(Option<String>),
    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Decode(String),
    /// Envelope decoded but no body field was populated
    #[error("Response carried no document body")]
    MissingBody,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Reasons a document yields no metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The first line is not an opening marker
    #[error("document does not start with a metadata marker")]
    NoOpeningMarker,
    /// Opening marker present without a closing marker
    #[error("metadata block is never closed")]
    MalformedBlock,
    /// Block parsed to zero top-level keys
    #[error("metadata block has no entries")]
    EmptyBlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::HttpStatus(404).to_string(), "HTTP error: 404");
        assert_eq!(
            FetchError::NonJsonResponse(Some("text/html".into())).to_string(),
            "Expected JSON response, got text/html"
        );
        assert_eq!(
            FetchError::NonJsonResponse(None).to_string(),
            "Expected JSON response, got no content type"
        );
    }
}
