//! Navigation addresses and change events.

use std::fmt;

use crate::config::{CANONICAL_ID_LEN, REVISION_QUERY_PARAM};

/// Location of the host application, split into path and query.
///
/// The query keeps its leading `?` (empty when absent), mirroring
/// `location.search`. Two addresses are equal when their combined
/// `path + query` forms are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address {
    pub path: String,
    pub query: String,
}

impl Address {
    /// Build an address from separate location components.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query = query.into();
        let query = if query.is_empty() || query.starts_with('?') {
            query
        } else {
            format!("?{}", query)
        };
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parse a location string such as `/abc?x=1#top`.
    ///
    /// Any fragment is dropped; it never takes part in comparisons.
    pub fn parse(location: &str) -> Self {
        let location = location.split('#').next().unwrap_or_default();
        match location.split_once('?') {
            Some((path, query)) => Self::new(path, format!("?{}", query)),
            None => Self::new(location, ""),
        }
    }

    /// Page identifier when the path is exactly a canonical id.
    ///
    /// A canonical path is `/` followed by 24 hexadecimal characters
    /// (either case) and nothing else.
    pub fn page_id(&self) -> Option<&str> {
        let id = self.path.strip_prefix('/')?;
        (id.len() == CANONICAL_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())).then_some(id)
    }

    /// Whether this address points at a content page.
    pub fn is_canonical(&self) -> bool {
        self.page_id().is_some()
    }

    /// Decoded value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.trim_start_matches('?');
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Historical revision requested through the query string, if any.
    pub fn revision_id(&self) -> Option<String> {
        self.query_param(REVISION_QUERY_PARAM)
            .filter(|rev| !rev.is_empty())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.query)
    }
}

/// A change from one address to another, as observed by the monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEvent {
    pub from: Address,
    pub to: Address,
}
