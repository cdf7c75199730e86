//! Render a [`Mapping`] back into dialect text.
//!
//! Strings that would read back as another type (or lose whitespace) are
//! double-quoted. Non-empty lists use block form, empty lists `[]`, nested
//! mappings are indented two spaces per level. An empty nested mapping has
//! no textual form and renders as a bare key, which reads back as null.

use super::parser::{is_number, unquote};
use crate::models::{Mapping, Value};

const INDENT_STEP: usize = 2;

/// Render `map` as dialect text, one entry per line.
pub fn render(map: &Mapping) -> String {
    let mut out = String::new();
    render_into(&mut out, map, 0);
    out
}

fn render_into(out: &mut String, map: &Mapping, indent: usize) {
    let pad = " ".repeat(indent);
    for (key, value) in map.iter() {
        match value {
            Value::List(items) if !items.is_empty() => {
                out.push_str(&format!("{pad}{key}:\n"));
                let item_pad = " ".repeat(indent + INDENT_STEP);
                for item in items {
                    out.push_str(&format!("{item_pad}- {}\n", quote_item(item)));
                }
            }
            Value::Map(nested) => {
                out.push_str(&format!("{pad}{key}:\n"));
                render_into(out, nested, indent + INDENT_STEP);
            }
            scalar => out.push_str(&format!("{pad}{key}: {}\n", render_scalar(scalar))),
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_scalar(s),
        Value::List(_) => "[]".to_string(),
        Value::Map(_) => String::new(),
    }
}

fn quote_scalar(s: &str) -> String {
    let ambiguous = matches!(s, "true" | "false" | "null" | "~")
        || is_number(s)
        || (s.starts_with('[') && s.ends_with(']'));
    if ambiguous || loses_shape(s) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

fn quote_item(s: &str) -> String {
    if loses_shape(s) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Whether reading `s` back would trim or unwrap it.
fn loses_shape(s: &str) -> bool {
    s.is_empty() || s.trim() != s || unquote(s).len() != s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::parse;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn map(entries: Vec<(&str, Value)>) -> Mapping {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_render_shape() {
        let m = map(vec![
            ("title", s("Hello")),
            ("tags", Value::List(vec!["a".into(), "b".into()])),
            ("meta", Value::Map(map(vec![("draft", Value::Bool(true))]))),
        ]);
        assert_eq!(
            render(&m),
            "title: Hello\ntags:\n  - a\n  - b\nmeta:\n  draft: true\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let samples = vec![
            map(vec![
                ("title", s("Hello")),
                ("count", Value::Number(42.0)),
                ("ratio", Value::Number(-0.125)),
                ("flag", Value::Bool(false)),
                ("nothing", Value::Null),
                ("empty", Value::List(vec![])),
            ]),
            map(vec![
                ("looks_bool", s("true")),
                ("looks_null", s("~")),
                ("looks_number", s("12.5")),
                ("looks_list", s("[a, b]")),
                ("quoted", s("\"already\"")),
                ("single", s("'x'")),
                ("padded", s("  spaced  ")),
                ("blank", s("")),
                ("colon", s("a: b")),
                ("hash", s("#tag")),
            ]),
            map(vec![
                (
                    "items",
                    Value::List(vec![
                        "plain".into(),
                        "".into(),
                        " lead".into(),
                        "'q'".into(),
                        "with, comma".into(),
                        "- dash".into(),
                    ]),
                ),
                (
                    "outer",
                    Value::Map(map(vec![
                        ("inner", Value::Map(map(vec![("leaf", Value::Number(1.0))]))),
                        ("list", Value::List(vec!["x".into()])),
                        ("after", s("y")),
                    ])),
                ),
                ("tail", s("end")),
            ]),
        ];

        for original in samples {
            let text = render(&original);
            assert_eq!(parse(&text), original, "round trip failed for:\n{}", text);
        }
    }

    #[test]
    fn test_empty_nested_map_reads_back_as_null() {
        let m = map(vec![("meta", Value::Map(Mapping::new()))]);
        assert_eq!(parse(&render(&m)).get("meta"), Some(&Value::Null));
    }
}
