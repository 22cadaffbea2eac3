//! Configuration for a [`RepresentationFactory`].
//!
//! [`FactoryConfig`] is a plain, deserializable description of the defaults a
//! factory stamps onto every representation. Hosts that keep their HAL setup
//! in a configuration file can load it with serde and hand it to
//! [`RepresentationFactory::from_config`].
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `namespaces` | empty | Prefix to URI map seeded into every representation |
//! | `links` | empty | Links seeded into every representation |
//! | `flags` | empty | Feature flag URIs consulted by renderers |
//! | `enable_logging` | false | Emit `tracing` events for codec dispatch |
//!
//! # Examples
//!
//! ```
//! use halbuilder::{FactoryConfig, RepresentationFactory};
//!
//! let config = FactoryConfig::from_json_str(r#"{
//!     "namespaces": { "ns": "https://example.com/rels/{rel}" },
//!     "links": [ { "rel": "help", "href": "/docs" } ],
//!     "flags": [ "urn:halbuilder:prettyprint" ]
//! }"#)?;
//!
//! let factory = RepresentationFactory::from_config(&config)?;
//! assert_eq!(factory.links().len(), 1);
//! assert!(factory.namespaces().contains("ns"));
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! [`RepresentationFactory`]: super::RepresentationFactory
//! [`RepresentationFactory::from_config`]: super::RepresentationFactory::from_config

use crate::error::Result;
use crate::types::Link;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Defaults applied by a representation factory.
///
/// # Example
///
/// ```
/// use halbuilder::FactoryConfig;
///
/// let config = FactoryConfig {
///     enable_logging: true,
///     ..Default::default()
/// };
/// assert!(config.namespaces.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Namespace prefix to URI.
    pub namespaces: BTreeMap<String, String>,

    /// Links added to every new representation, in order.
    pub links: Vec<LinkConfig>,

    /// Feature flags.
    pub flags: Vec<Url>,

    /// Enable dispatch logging.
    ///
    /// When enabled, renderer/reader selection is logged using the `tracing`
    /// crate at debug level.
    pub enable_logging: bool,
}

/// Serializable description of a default link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Relation name
    pub rel: String,
    /// Target URI
    pub href: String,
    /// Optional name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional target language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl FactoryConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl LinkConfig {
    /// Build the link this entry describes.
    pub fn to_link(&self) -> Result<Link> {
        let mut link = Link::new(self.rel.as_str(), self.href.as_str())?;
        if let Some(name) = &self.name {
            link = link.with_name(name.as_str());
        }
        if let Some(title) = &self.title {
            link = link.with_title(title.as_str());
        }
        if let Some(hreflang) = &self.hreflang {
            link = link.with_hreflang(hreflang.as_str());
        }
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FactoryConfig::default();
        assert!(config.namespaces.is_empty());
        assert!(config.links.is_empty());
        assert!(config.flags.is_empty());
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_partial_json() {
        let config = FactoryConfig::from_json_str(r#"{"enable_logging": true}"#).unwrap();
        assert!(config.enable_logging);
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let result = FactoryConfig::from_json_str(r#"{"flags": ["not a uri"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_link_config_to_link() {
        let entry = LinkConfig {
            rel: "help".into(),
            href: "/docs".into(),
            name: None,
            title: Some("Help".into()),
            hreflang: Some("en".into()),
        };
        let link = entry.to_link().unwrap();
        assert_eq!(link.title(), Some("Help"));
        assert_eq!(link.hreflang(), Some("en"));
    }

    #[test]
    fn test_link_config_empty_href() {
        let entry = LinkConfig {
            rel: "help".into(),
            href: String::new(),
            name: None,
            title: None,
            hreflang: None,
        };
        assert!(entry.to_link().is_err());
    }

    #[test]
    fn test_clone() {
        let config = FactoryConfig::default();
        assert_eq!(config.clone(), config);
    }
}
