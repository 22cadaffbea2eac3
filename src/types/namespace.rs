//! Namespace (CURIE) registry for link relations.
//!
//! HAL qualifies non-standard relations with compact URIs: `ns:orders` stands
//! for the relation URI obtained by expanding prefix `ns`. A namespace URI may
//! be a template containing `{rel}`, or a plain base that the reference is
//! appended to.
//!
//! | Namespace URI | CURIE | Expansion |
//! |---------------|-------|-----------|
//! | `https://example.com/rels/{rel}` | `ns:orders` | `https://example.com/rels/orders` |
//! | `https://example.com/rels/` | `ns:orders` | `https://example.com/rels/orders` |
//!
//! # Examples
//!
//! ```
//! use halbuilder::NamespaceManager;
//!
//! let mut namespaces = NamespaceManager::new();
//! namespaces.add("ns", "https://example.com/rels/{rel}").unwrap();
//!
//! assert_eq!(
//!     namespaces.resolve("ns:orders").as_deref(),
//!     Some("https://example.com/rels/orders")
//! );
//! assert_eq!(
//!     namespaces.compact("https://example.com/rels/orders").as_deref(),
//!     Some("ns:orders")
//! );
//! assert!(namespaces.add("ns", "https://other.example/").is_err());
//! ```

use crate::error::{RepresentationError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Placeholder substituted by the CURIE reference in templated namespace URIs.
const REL_PLACEHOLDER: &str = "{rel}";

static CURIE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_.\-]*):([^\s:/][^\s]*)$").expect("valid CURIE pattern")
});

/// Split a relation into `(prefix, reference)` when it is shaped like a CURIE.
///
/// ```
/// use halbuilder::types::split_curie;
///
/// assert_eq!(split_curie("ns:orders"), Some(("ns", "orders")));
/// assert_eq!(split_curie("self"), None);
/// assert_eq!(split_curie("http://example.com"), None);
/// ```
pub fn split_curie(rel: &str) -> Option<(&str, &str)> {
    let caps = CURIE.captures(rel)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Ordered prefix to URI map with unique prefixes.
///
/// Iteration is lexicographic by prefix so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceManager {
    namespaces: BTreeMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix.
    ///
    /// Fails with [`RepresentationError::DuplicateNamespace`] when the prefix
    /// is already present; the existing URI is never overwritten.
    pub fn add(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Result<()> {
        let prefix = prefix.into();
        if self.namespaces.contains_key(&prefix) {
            return Err(RepresentationError::DuplicateNamespace(prefix));
        }
        self.namespaces.insert(prefix, uri.into());
        Ok(())
    }

    /// URI registered for `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    /// Whether `prefix` is registered.
    pub fn contains(&self, prefix: &str) -> bool {
        self.namespaces.contains_key(prefix)
    }

    /// Iterate `(prefix, uri)` pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether no prefix is registered.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Expand a CURIE relation through its registered namespace.
    ///
    /// Returns `None` for relations that are not CURIEs or whose prefix is
    /// unknown.
    pub fn resolve(&self, rel: &str) -> Option<String> {
        let (prefix, reference) = split_curie(rel)?;
        let uri = self.get(prefix)?;
        if uri.contains(REL_PLACEHOLDER) {
            Some(uri.replace(REL_PLACEHOLDER, reference))
        } else {
            Some(format!("{}{}", uri, reference))
        }
    }

    /// Compact a full relation URI into a CURIE using the first matching
    /// namespace in prefix order.
    pub fn compact(&self, href: &str) -> Option<String> {
        self.iter().find_map(|(prefix, uri)| {
            let reference = match uri.split_once(REL_PLACEHOLDER) {
                Some((head, tail)) => href.strip_prefix(head)?.strip_suffix(tail)?,
                None => href.strip_prefix(uri)?,
            };
            if reference.is_empty() {
                None
            } else {
                Some(format!("{}:{}", prefix, reference))
            }
        })
    }
}
