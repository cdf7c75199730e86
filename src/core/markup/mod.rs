//! Constrained data-markup dialect used in metadata blocks.
//!
//! Supports:
//! - `key: value` scalars (booleans, null, numbers, quoted and bare strings)
//! - Inline lists: `tags: [a, 'b']`
//! - Block lists: `key:` followed by deeper `- item` lines
//! - Nested mappings by indentation
//! - `#` comment lines and blank lines anywhere

mod parser;
mod render;

pub use parser::{coerce_scalar, parse_block};
pub use render::render;

use crate::models::Mapping;

/// Parse dialect text whose top-level keys are unindented.
pub fn parse(text: &str) -> Mapping {
    let lines: Vec<&str> = text.lines().collect();
    parse_block(&lines, 0, 0).0
}
