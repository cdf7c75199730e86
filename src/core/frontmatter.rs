//! Metadata block extraction.
//!
//! A block is only recognized at the very start of a document:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! Body text...
//! ```

use log::warn;

use super::error::ExtractError;
use super::markup;
use crate::config::BLOCK_MARKER;
use crate::models::MetadataBlock;

/// Extract and parse the leading metadata block, if the document has one.
///
/// Unclosed blocks are logged; every other miss is silent.
pub fn extract(text: &str) -> Option<MetadataBlock> {
    match try_extract(text) {
        Ok(block) => Some(block),
        Err(err @ ExtractError::MalformedBlock) => {
            warn!("ignoring metadata: {}", err);
            None
        }
        Err(_) => None,
    }
}

/// Like [`extract`], but reports why no block was produced.
pub fn try_extract(text: &str) -> Result<MetadataBlock, ExtractError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    if !lines.next().is_some_and(is_marker) {
        return Err(ExtractError::NoOpeningMarker);
    }

    let mut enclosed = Vec::new();
    for line in lines {
        if is_marker(line) {
            let raw_text = enclosed.join("\n").trim().to_string();
            let structured = markup::parse(&raw_text);
            if structured.is_empty() {
                return Err(ExtractError::EmptyBlock);
            }
            return Ok(MetadataBlock {
                raw_text,
                structured,
            });
        }
        enclosed.push(line);
    }

    Err(ExtractError::MalformedBlock)
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == BLOCK_MARKER
}
