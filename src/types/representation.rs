//! Representation model: mutable builder and read-only view.
//!
//! A HAL resource carries four things: namespaces, links, properties and
//! embedded child resources. The same shape is exposed through two types:
//!
//! | Type | Produced by | Capabilities |
//! |------|-------------|--------------|
//! | [`Representation`] | [`RepresentationFactory::new_representation`] | build + read |
//! | [`ReadableRepresentation`] | readers, [`Representation::freeze`] | read only |
//!
//! A builder dereferences to the read-only view, so every accessor is
//! available while building. The view has no mutators at all.
//!
//! # Ownership of embedded resources
//!
//! Children are moved into their parent. A representation therefore cannot be
//! embedded into itself and embedding can never form a cycle.
//!
//! # Examples
//!
//! ```
//! use halbuilder::Representation;
//! use serde_json::json;
//!
//! let order = Representation::new(Some("/orders/1"))?
//!     .with_link("ns:customer", "/customers/7")?
//!     .with_property("total", 30.0)?
//!     .with_property("currency", "EUR")?
//!     .with_representation_fn("ns:item", Some("/items/1"), |item| {
//!         item.with_property("sku", "X-1")
//!     })?;
//!
//! assert_eq!(order.href(), Some("/orders/1"));
//! assert_eq!(order.value("currency"), Some(&json!("EUR")));
//! assert_eq!(order.resources_by_rel("ns:item").len(), 1);
//!
//! let view = order.freeze();
//! assert_eq!(view.links_by_rel("ns:customer")[0].href(), "/customers/7");
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! [`RepresentationFactory::new_representation`]: crate::RepresentationFactory::new_representation

use super::{Link, NamespaceManager};
use crate::error::{RepresentationError, Result};
use crate::protocol::constants::keys;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::ops::Deref;
use url::Url;

/// A predicate over representations, such as "has a `total` property".
///
/// Implemented for any `Fn(&ReadableRepresentation) -> bool`.
///
/// ```
/// use halbuilder::Representation;
///
/// let order = Representation::new(None)?.with_property("total", 10)?;
/// assert!(order.is_satisfied_by(|r: &halbuilder::ReadableRepresentation| r.value("total").is_some()));
/// # Ok::<(), halbuilder::RepresentationError>(())
/// ```
pub trait Contract {
    /// Whether `representation` fulfils this contract.
    fn is_satisfied_by(&self, representation: &ReadableRepresentation) -> bool;
}

impl<F> Contract for F
where
    F: Fn(&ReadableRepresentation) -> bool,
{
    fn is_satisfied_by(&self, representation: &ReadableRepresentation) -> bool {
        self(representation)
    }
}

/// Read-only view of a HAL resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadableRepresentation {
    namespaces: NamespaceManager,
    links: Vec<Link>,
    properties: Map<String, Value>,
    /// Rel -> children, rels in first-insertion order
    resources: Vec<(String, Vec<ReadableRepresentation>)>,
    flags: BTreeSet<Url>,
}

impl ReadableRepresentation {
    /// The `self` link, if the resource has one.
    pub fn resource_link(&self) -> Option<&Link> {
        self.links.iter().find(|link| link.rel() == keys::SELF)
    }

    /// The href of the `self` link.
    pub fn href(&self) -> Option<&str> {
        self.resource_link().map(Link::href)
    }

    /// Declared namespaces, in prefix order.
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// All links in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links whose relation is `rel`.
    ///
    /// A CURIE and its expansion name the same relation, so `ns:orders`
    /// also matches a link stored as `https://example.com/rels/orders` and
    /// vice versa.
    pub fn links_by_rel(&self, rel: &str) -> Vec<&Link> {
        let wanted = self.expand_rel(rel);
        self.links
            .iter()
            .filter(|link| link.rel() == rel || self.expand_rel(link.rel()) == wanted)
            .collect()
    }

    /// First link whose relation is `rel`.
    pub fn link_by_rel(&self, rel: &str) -> Option<&Link> {
        self.links_by_rel(rel).into_iter().next()
    }

    /// Property names in insertion order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// All properties in insertion order.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Value of one property.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Whether any top-level property is null.
    pub fn has_null_properties(&self) -> bool {
        self.properties.values().any(Value::is_null)
    }

    /// Embedded resources grouped by rel, rels in first-insertion order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &[ReadableRepresentation])> {
        self.resources
            .iter()
            .map(|(rel, children)| (rel.as_str(), children.as_slice()))
    }

    /// Embedded resources under one rel, empty when there are none.
    pub fn resources_by_rel(&self, rel: &str) -> &[ReadableRepresentation] {
        self.resources
            .iter()
            .find(|(r, _)| r == rel)
            .map(|(_, children)| children.as_slice())
            .unwrap_or(&[])
    }

    /// Feature flags in effect for this representation.
    pub fn flags(&self) -> &BTreeSet<Url> {
        &self.flags
    }

    /// Whether the flag identified by `id` is set.
    pub fn has_flag(&self, id: &str) -> bool {
        self.flags.iter().any(|flag| flag.as_str() == id)
    }

    /// Check a caller-supplied contract against this representation.
    pub fn is_satisfied_by(&self, contract: impl Contract) -> bool {
        contract.is_satisfied_by(self)
    }

    /// Deserialize the properties into a typed value.
    ///
    /// ```
    /// use halbuilder::Representation;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Order { total: u32 }
    ///
    /// let order = Representation::new(None)?.with_property("total", 10)?;
    /// let typed: Order = order.to_value()?;
    /// assert_eq!(typed.total, 10);
    /// # Ok::<(), halbuilder::RepresentationError>(())
    /// ```
    pub fn to_value<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.properties.clone()))?)
    }

    fn expand_rel(&self, rel: &str) -> String {
        self.namespaces
            .resolve(rel)
            .unwrap_or_else(|| rel.to_string())
    }
}

/// Mutable HAL resource under construction.
///
/// Every `with_*` method consumes and returns the representation so calls
/// chain; the fallible ones return [`Result`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    inner: ReadableRepresentation,
}

impl Representation {
    /// Create an empty representation, addressed by `href` when given.
    ///
    /// An href becomes the first link, with rel `self`.
    pub fn new(href: Option<&str>) -> Result<Self> {
        let mut representation = Representation::default();
        if let Some(href) = href {
            representation.inner.links.push(Link::new(keys::SELF, href)?);
        }
        Ok(representation)
    }

    /// Replace the feature flags carried by this representation.
    pub fn with_flags(mut self, flags: BTreeSet<Url>) -> Self {
        self.inner.flags = flags;
        self
    }

    /// Declare a namespace prefix.
    ///
    /// Fails with [`RepresentationError::DuplicateNamespace`] if the prefix is
    /// already declared, including prefixes inherited from a factory.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Result<Self> {
        self.inner.namespaces.add(prefix, uri)?;
        Ok(self)
    }

    /// Append a link. Several links may share a rel.
    pub fn with_link(self, rel: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        Ok(self.with_link_value(Link::new(rel, href)?))
    }

    /// Append a fully described link.
    pub fn with_link_value(mut self, link: Link) -> Self {
        self.inner.links.push(link);
        self
    }

    /// Add a property.
    ///
    /// Fails with [`RepresentationError::DuplicateProperty`] if the name is
    /// already present, and with [`RepresentationError::InvalidValue`] for the
    /// reserved `_links` and `_embedded` names. Values may be any JSON
    /// structure.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let name = name.into();
        if name == keys::LINKS || name == keys::EMBEDDED {
            return Err(RepresentationError::InvalidValue(format!(
                "'{}' is reserved and cannot be used as a property name",
                name
            )));
        }
        if self.inner.properties.contains_key(&name) {
            return Err(RepresentationError::DuplicateProperty(name));
        }
        self.inner.properties.insert(name, value.into());
        Ok(self)
    }

    /// Add every field of a serializable struct as a property.
    ///
    /// The value must serialize to a JSON object.
    pub fn with_fields<T: Serialize + ?Sized>(self, fields: &T) -> Result<Self> {
        match serde_json::to_value(fields)? {
            Value::Object(map) => map
                .into_iter()
                .try_fold(self, |rep, (name, value)| rep.with_property(name, value)),
            other => Err(RepresentationError::InvalidValue(format!(
                "expected an object of fields, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Embed a child resource under `rel`.
    ///
    /// Embedding a second child under the same rel turns the rel into an
    /// ordered list of children.
    pub fn with_representation(
        mut self,
        rel: impl Into<String>,
        child: impl Into<ReadableRepresentation>,
    ) -> Result<Self> {
        let rel = rel.into();
        if rel.trim().is_empty() {
            return Err(RepresentationError::InvalidLink(
                "empty rel for embedded resource".to_string(),
            ));
        }
        let child = child.into();
        match self.inner.resources.iter_mut().find(|(r, _)| *r == rel) {
            Some((_, children)) => children.push(child),
            None => self.inner.resources.push((rel, vec![child])),
        }
        Ok(self)
    }

    /// Build a child in place and embed it under `rel`.
    ///
    /// The child starts empty (apart from its `self` link when `href` is
    /// given) and carries this representation's flags.
    pub fn with_representation_fn<F>(self, rel: impl Into<String>, href: Option<&str>, build: F) -> Result<Self>
    where
        F: FnOnce(Representation) -> Result<Representation>,
    {
        let child = Representation::new(href)?.with_flags(self.inner.flags.clone());
        let child = build(child)?;
        self.with_representation(rel, child)
    }

    /// Finish building and return the read-only view.
    pub fn freeze(self) -> ReadableRepresentation {
        self.inner
    }
}

impl Deref for Representation {
    type Target = ReadableRepresentation;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Representation> for ReadableRepresentation {
    fn from(representation: Representation) -> Self {
        representation.freeze()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
