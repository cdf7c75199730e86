//! Ordered key/value data produced by the metadata parser.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

// =============================================================================
// Value
// =============================================================================

/// A single metadata value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Inline `[a, b]` or block `- a` list; items are never coerced
    List(Vec<String>),
    Map(Mapping),
}

impl Value {
    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the nested mapping, if this is one.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Cell text as shown in a table view.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "{}", items.join(", ")),
            Self::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Insertion-ordered map with unique keys.
///
/// Re-inserting an existing key replaces its value but keeps the key's
/// original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert a value, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = Mapping::new();
        map.insert("b", s("1"));
        map.insert("a", s("2"));
        assert_eq!(map.insert("b", s("3")), Some(s("1")));

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(&s("3")));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut inner = Mapping::new();
        inner.insert("draft", Value::Bool(true));

        let map: Mapping = vec![
            ("zeta".to_string(), Value::Number(2.5)),
            ("alpha".to_string(), Value::List(vec!["x".into()])),
            ("meta".to_string(), Value::Map(inner)),
            ("none".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zeta":2.5,"alpha":["x"],"meta":{"draft":true},"none":null}"#
        );
    }

    #[test]
    fn test_display_cells() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(-1.25).to_string(), "-1.25");
        assert_eq!(Value::List(vec!["a".into(), "b".into()]).to_string(), "a, b");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
