//! Hyperlink value for HAL representations.
//!
//! A [`Link`] names a relation (`rel`) from a resource to a target (`href`).
//! Links are immutable values: the `with_*` methods return a new link.
//!
//! # Fields
//!
//! | Field | Required | Notes |
//! |-------|----------|-------|
//! | `rel` | yes | Relation name, possibly a CURIE such as `ns:orders` |
//! | `href` | yes | URI or URI template |
//! | `name` | no | Secondary key among links sharing a rel |
//! | `title` | no | Human readable label |
//! | `hreflang` | no | Language of the target |
//! | `profile` | no | Profile URI of the target |
//!
//! `templated` is derived: a link is templated when its href contains `{`.
//!
//! # Examples
//!
//! ```
//! use halbuilder::Link;
//!
//! let link = Link::new("ns:orders", "/orders{?page}")
//!     .unwrap()
//!     .with_title("Orders");
//!
//! assert!(link.is_templated());
//! assert_eq!(link.title(), Some("Orders"));
//! assert!(Link::new("", "/orders").is_err());
//! ```

use crate::error::{RepresentationError, Result};

/// A single hyperlink relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    rel: String,
    href: String,
    name: Option<String>,
    title: Option<String>,
    hreflang: Option<String>,
    profile: Option<String>,
}

impl Link {
    /// Create a link, rejecting an empty rel or href.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        let rel = rel.into();
        let href = href.into();
        if rel.trim().is_empty() {
            return Err(RepresentationError::InvalidLink(format!(
                "empty rel for href '{}'",
                href
            )));
        }
        if href.trim().is_empty() {
            return Err(RepresentationError::InvalidLink(format!(
                "empty href for rel '{}'",
                rel
            )));
        }
        Ok(Link {
            rel,
            href,
            name: None,
            title: None,
            hreflang: None,
            profile: None,
        })
    }

    /// Set the link name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the link title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the target language
    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    /// Set the target profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Relation name.
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Target URI or URI template.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Optional name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Optional title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Optional target language.
    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// Optional target profile.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Whether the href is a URI template.
    #[inline]
    pub fn is_templated(&self) -> bool {
        self.href.contains('{')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link() {
        let link = Link::new("self", "/orders/1").unwrap();
        assert_eq!(link.rel(), "self");
        assert_eq!(link.href(), "/orders/1");
        assert!(!link.is_templated());
        assert_eq!(link.name(), None);
    }

    #[test]
    fn test_empty_href_rejected() {
        let err = Link::new("self", "  ").unwrap_err();
        assert!(matches!(err, RepresentationError::InvalidLink(_)));
    }

    #[test]
    fn test_optional_fields() {
        let link = Link::new("alternate", "/orders/1.fr")
            .unwrap()
            .with_name("fr")
            .with_title("Commande")
            .with_hreflang("fr")
            .with_profile("urn:order");
        assert_eq!(link.name(), Some("fr"));
        assert_eq!(link.title(), Some("Commande"));
        assert_eq!(link.hreflang(), Some("fr"));
        assert_eq!(link.profile(), Some("urn:order"));
    }

    #[test]
    fn test_templated_detection() {
        assert!(Link::new("find", "/orders/{id}").unwrap().is_templated());
        assert!(!Link::new("find", "/orders?id=1").unwrap().is_templated());
    }

    #[test]
    fn test_links_are_values() {
        let a = Link::new("next", "/page/2").unwrap();
        let b = a.clone().with_title("Next");
        assert_ne!(a, b);
        assert_eq!(a.title(), None);
    }
}
