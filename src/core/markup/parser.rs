//! Indentation-sensitive parser for the metadata dialect.
//!
//! The cursor is threaded explicitly: every entry point takes a line index
//! and returns the index of the first line it did not consume. Each loop
//! iteration consumes at least one line, so parsing is linear in the
//! number of lines whatever the input looks like.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Mapping, Value};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("number pattern is valid"));

const LIST_MARKER: &str = "- ";

// =============================================================================
// Block Parsing
// =============================================================================

/// Parse the mapping whose keys sit at exactly `base_indent`.
///
/// Returns the mapping and the index of the first line belonging to an
/// enclosing (shallower) block, or `lines.len()` at end of input.
pub fn parse_block(lines: &[&str], start: usize, base_indent: usize) -> (Mapping, usize) {
    let mut map = Mapping::new();
    let mut idx = start;

    while idx < lines.len() {
        let line = lines[idx];
        if is_skippable(line) {
            idx += 1;
            continue;
        }

        let indent = indent_of(line);
        if indent < base_indent {
            break;
        }
        idx += 1;
        // Deeper line nobody claimed
        if indent > base_indent {
            continue;
        }

        let Some((key, raw)) = line.trim().split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let raw = raw.trim();

        let value = if !raw.is_empty() {
            parse_inline(raw)
        } else {
            match next_content_line(lines, idx) {
                Some(next) if indent_of(lines[next]) > base_indent => {
                    let child_indent = indent_of(lines[next]);
                    if is_list_item(lines[next]) {
                        let (items, end) = parse_block_list(lines, next, child_indent);
                        idx = end;
                        Value::List(items)
                    } else {
                        let (nested, end) = parse_block(lines, next, child_indent);
                        idx = end;
                        Value::Map(nested)
                    }
                }
                _ => Value::Null,
            }
        };

        map.insert(key, value);
    }

    (map, idx)
}

/// Parse `- item` lines at exactly `indent`.
///
/// Stops at the first line shallower than `indent`, or at a non-item line
/// at `indent`; that line is left for the caller.
fn parse_block_list(lines: &[&str], start: usize, indent: usize) -> (Vec<String>, usize) {
    let mut items = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        let line = lines[idx];
        if is_skippable(line) {
            idx += 1;
            continue;
        }

        let line_indent = indent_of(line);
        if line_indent < indent {
            break;
        }
        if line_indent == indent {
            let Some(item) = line.trim_start().strip_prefix(LIST_MARKER) else {
                break;
            };
            items.push(unquote(item.trim()).to_string());
        }
        idx += 1;
    }

    (items, idx)
}

// =============================================================================
// Values
// =============================================================================

/// Parse a non-empty raw value: inline list or scalar.
fn parse_inline(raw: &str) -> Value {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if inner.trim().is_empty() {
            return Value::List(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .collect();
        return Value::List(items);
    }
    coerce_scalar(raw)
}

/// Coerce a trimmed scalar.
///
/// Order: booleans, null, numbers, quoted strings, then the raw text.
pub fn coerce_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" | "~" => Value::Null,
        _ if is_number(raw) => raw
            .parse()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        _ => Value::String(unquote(raw).to_string()),
    }
}

pub(super) fn is_number(raw: &str) -> bool {
    NUMBER.is_match(raw)
}

/// Strip one layer of matching single or double quotes.
pub(super) fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    match bytes {
        [first @ (b'"' | b'\''), .., last] if first == last => &s[1..s.len() - 1],
        _ => s,
    }
}

// =============================================================================
// Line Helpers
// =============================================================================

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn is_list_item(line: &str) -> bool {
    line.trim_start().starts_with(LIST_MARKER)
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn next_content_line(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| !is_skippable(lines[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::parse;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn list(items: &[&str]) -> Value {
        Value::List(items.iter().map(|i| i.to_string()).collect())
    }

    #[test]
    fn test_basic_block() {
        let map = parse("title: Hello\ntags: [a, b]\nmeta:\n  draft: true");

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["title", "tags", "meta"]);
        assert_eq!(map.get("title"), Some(&s("Hello")));
        assert_eq!(map.get("tags"), Some(&list(&["a", "b"])));

        let meta = map.get("meta").and_then(Value::as_map).unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("draft"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(coerce_scalar("true"), Value::Bool(true));
        assert_eq!(coerce_scalar("false"), Value::Bool(false));
        assert_eq!(coerce_scalar("null"), Value::Null);
        assert_eq!(coerce_scalar("~"), Value::Null);
        assert_eq!(coerce_scalar("42"), Value::Number(42.0));
        assert_eq!(coerce_scalar("-3.5"), Value::Number(-3.5));
        assert_eq!(coerce_scalar("1.2.3"), s("1.2.3"));
        assert_eq!(coerce_scalar("1e5"), s("1e5"));
        assert_eq!(coerce_scalar("\"true\""), s("true"));
        assert_eq!(coerce_scalar("'42'"), s("42"));
        assert_eq!(coerce_scalar("\"mixed'"), s("\"mixed'"));
        assert_eq!(coerce_scalar("\""), s("\""));
        assert_eq!(coerce_scalar("True"), s("True"));
    }

    #[test]
    fn test_inline_lists_are_not_coerced() {
        let map = parse("nums: [1, true, 'x', \"y\"]\nempty: []\nodd: [a");
        assert_eq!(map.get("nums"), Some(&list(&["1", "true", "x", "y"])));
        assert_eq!(map.get("empty"), Some(&Value::List(vec![])));
        assert_eq!(map.get("odd"), Some(&s("[a")));
    }

    #[test]
    fn test_block_list() {
        let map = parse("authors:\n  - Ada\n  - 'Grace Hopper'\n\n  - \"x\"\nnext: 1");
        assert_eq!(
            map.get("authors"),
            Some(&list(&["Ada", "Grace Hopper", "x"]))
        );
        assert_eq!(map.get("next"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_block_list_stops_at_non_item() {
        let map = parse("tags:\n  - a\n  stray: 1\n  - b\nafter: yes");
        assert_eq!(map.get("tags"), Some(&list(&["a"])));
        assert_eq!(map.get("after"), Some(&s("yes")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_value_is_null() {
        let map = parse("a:\nb:\n\nc: 1\nd:");
        assert_eq!(map.get("a"), Some(&Value::Null));
        assert_eq!(map.get("b"), Some(&Value::Null));
        assert_eq!(map.get("d"), Some(&Value::Null));
    }

    #[test]
    fn test_deeply_nested() {
        let map = parse("a:\n  b:\n    c:\n      d: deep\n    e: 2\n  f: [x]\ng: top");
        let a = map.get("a").and_then(Value::as_map).unwrap();
        let b = a.get("b").and_then(Value::as_map).unwrap();
        let c = b.get("c").and_then(Value::as_map).unwrap();
        assert_eq!(c.get("d"), Some(&s("deep")));
        assert_eq!(b.get("e"), Some(&Value::Number(2.0)));
        assert_eq!(a.get("f"), Some(&list(&["x"])));
        assert_eq!(map.get("g"), Some(&s("top")));
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let map = parse("url: https://example.org:8080/x");
        assert_eq!(map.get("url"), Some(&s("https://example.org:8080/x")));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let map = parse("no colon here\n: empty key\ntitle: ok\n    stray: deep\nlast: 1");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["title", "last"]);
    }

    #[test]
    fn test_duplicate_keys_keep_position() {
        let map = parse("a: 1\nb: 2\na: 3");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_returns_boundary_index() {
        let lines = ["root:", "  a: 1", "  b: 2", "next: 3"];
        let (nested, end) = parse_block(&lines, 1, 2);
        assert_eq!(nested.len(), 2);
        assert_eq!(end, 3);

        let (all, end) = parse_block(&lines, 0, 0);
        assert_eq!(all.len(), 2);
        assert_eq!(end, lines.len());
    }

    #[test]
    fn test_comment_and_blank_invariance() {
        let plain = "title: Hello\ntags:\n  - a\n  - b\nmeta:\n  draft: true\n  n: 1";
        let noisy = "# header\n\ntitle: Hello\n  # indented comment\ntags:\n\n  - a\n# between\n  - b\n\nmeta:\n   \n  draft: true\n\t\n  # c\n  n: 1\n\n# trailing";
        assert_eq!(parse(plain), parse(noisy));
    }

    #[test]
    fn test_terminates_on_hostile_input() {
        let mut text = String::new();
        for i in 0..5_000 {
            let indent = " ".repeat((i * 7919) % 13);
            match i % 5 {
                0 => text.push_str(&format!("{indent}k{i}:\n")),
                1 => text.push_str(&format!("{indent}- item\n")),
                2 => text.push_str(&format!("{indent}garbage\n")),
                3 => text.push_str(&format!("{indent}v{i}: [a, b\n")),
                _ => text.push_str(&format!("{indent}:\n")),
            }
        }
        let lines: Vec<&str> = text.lines().collect();
        let (_, end) = parse_block(&lines, 0, 0);
        assert_eq!(end, lines.len());
    }

    #[test]
    fn test_tab_indentation() {
        let map = parse("meta:\n\tdraft: false");
        let meta = map.get("meta").and_then(Value::as_map).unwrap();
        assert_eq!(meta.get("draft"), Some(&Value::Bool(false)));
    }
}
