//! HAL+JSON reader.

use crate::codec::RepresentationReader;
use crate::error::{RepresentationError, Result};
use crate::factory::RepresentationFactory;
use crate::protocol::constants::keys;
use crate::types::{Link, NamespaceManager, ReadableRepresentation, Representation};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::BufRead;
use url::Url;

/// Reads `application/hal+json` documents.
///
/// The reader is bound to the factory that created it: the resulting
/// representation carries the factory's flags, and factory namespaces the
/// document does not declare itself are added to the root so its CURIEs
/// resolve.
///
/// # Examples
///
/// ```
/// use halbuilder::{json::JsonRepresentationReader, RepresentationFactory, RepresentationReader};
///
/// let factory = RepresentationFactory::new();
/// let reader = JsonRepresentationReader::new(&factory);
/// let mut input = &br#"{"_links":{"self":{"href":"/a"}},"name":"Ada"}"#[..];
/// let rep = reader.read(&mut input)?;
/// assert_eq!(rep.href(), Some("/a"));
/// assert_eq!(rep.value("name").and_then(|v| v.as_str()), Some("Ada"));
/// # Ok::<(), halbuilder::RepresentationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonRepresentationReader {
    namespaces: NamespaceManager,
    flags: BTreeSet<Url>,
}

impl JsonRepresentationReader {
    /// Create a reader bound to `factory`.
    pub fn new(factory: &RepresentationFactory) -> Self {
        JsonRepresentationReader {
            namespaces: factory.namespaces().clone(),
            flags: factory.flags().clone(),
        }
    }

    /// Build a representation from an already parsed document.
    pub fn read_value(&self, document: &Value) -> Result<ReadableRepresentation> {
        let mut representation = self.read_resource(document)?;
        for (prefix, uri) in self.namespaces.iter() {
            if !representation.namespaces().contains(prefix) {
                representation = representation.with_namespace(prefix, uri)?;
            }
        }
        Ok(representation.freeze())
    }

    fn read_resource(&self, value: &Value) -> Result<Representation> {
        let object = value.as_object().ok_or_else(|| {
            RepresentationError::Parse(format!("expected a JSON object for a resource, got {}", value))
        })?;

        let mut representation = Representation::new(None)?.with_flags(self.flags.clone());

        if let Some(links) = object.get(keys::LINKS) {
            representation = read_links(representation, links)?;
        }

        for (name, value) in object {
            if name != keys::LINKS && name != keys::EMBEDDED {
                representation = representation.with_property(name.as_str(), value.clone())?;
            }
        }

        if let Some(embedded) = object.get(keys::EMBEDDED) {
            let embedded = expect_object(embedded, keys::EMBEDDED)?;
            for (rel, entries) in embedded {
                for entry in entries_of(entries) {
                    let child = self.read_resource(entry)?;
                    representation = representation.with_representation(rel.as_str(), child)?;
                }
            }
        }

        Ok(representation)
    }
}

impl RepresentationReader for JsonRepresentationReader {
    fn read(&self, input: &mut dyn BufRead) -> Result<ReadableRepresentation> {
        let document: Value = serde_json::from_reader(input)?;
        self.read_value(&document)
    }
}

fn read_links(mut representation: Representation, links: &Value) -> Result<Representation> {
    let links = expect_object(links, keys::LINKS)?;

    if let Some(curies) = links.get(keys::CURIES) {
        for curie in entries_of(curies) {
            let curie = expect_object(curie, keys::CURIES)?;
            let name = required_str(curie, "name", keys::CURIES)?;
            let href = required_str(curie, "href", keys::CURIES)?;
            representation = representation.with_namespace(name, href)?;
        }
    }

    for (rel, entries) in links {
        if rel == keys::CURIES {
            continue;
        }
        for entry in entries_of(entries) {
            let entry = expect_object(entry, rel)?;
            representation = representation.with_link_value(read_link(rel, entry)?);
        }
    }

    Ok(representation)
}

fn read_link(rel: &str, entry: &Map<String, Value>) -> Result<Link> {
    let mut link = Link::new(rel, required_str(entry, "href", rel)?)?;
    if let Some(name) = optional_str(entry, "name") {
        link = link.with_name(name);
    }
    if let Some(title) = optional_str(entry, "title") {
        link = link.with_title(title);
    }
    if let Some(hreflang) = optional_str(entry, "hreflang") {
        link = link.with_hreflang(hreflang);
    }
    if let Some(profile) = optional_str(entry, "profile") {
        link = link.with_profile(profile);
    }
    Ok(link)
}

/// A rel maps to either one entry or an array of entries.
fn entries_of(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn expect_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        RepresentationError::Parse(format!("expected an object under '{}', got {}", context, value))
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str, context: &str) -> Result<&'a str> {
    object.get(key).and_then(Value::as_str).ok_or_else(|| {
        RepresentationError::Parse(format!("missing string '{}' under '{}'", key, context))
    })
}

fn optional_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reader() -> JsonRepresentationReader {
        JsonRepresentationReader::new(&RepresentationFactory::new())
    }

    #[test]
    fn test_read_links_and_curies() {
        let document = json!({
            "_links": {
                "curies": [{"name": "ns", "href": "https://example.com/rels/{rel}", "templated": true}],
                "self": {"href": "/orders"},
                "ns:item": [{"href": "/orders/1"}, {"href": "/orders/2", "title": "Second"}]
            }
        });
        let rep = reader().read_value(&document).unwrap();
        assert_eq!(rep.href(), Some("/orders"));
        assert_eq!(rep.namespaces().get("ns"), Some("https://example.com/rels/{rel}"));
        let items = rep.links_by_rel("ns:item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title(), Some("Second"));
    }

    #[test]
    fn test_read_embedded() {
        let document = json!({
            "count": 2,
            "_embedded": {
                "item": [
                    {"_links": {"self": {"href": "/items/1"}}, "sku": "A"},
                    {"_links": {"self": {"href": "/items/2"}}, "sku": "B"}
                ],
                "owner": {"name": "Ada"}
            }
        });
        let rep = reader().read_value(&document).unwrap();
        assert_eq!(rep.value("count"), Some(&json!(2)));
        assert_eq!(rep.resources_by_rel("item").len(), 2);
        assert_eq!(rep.resources_by_rel("item")[1].value("sku"), Some(&json!("B")));
        assert_eq!(rep.resources_by_rel("owner").len(), 1);
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = reader().read_value(&json!([1, 2])).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_rejects_link_without_href() {
        let err = reader()
            .read_value(&json!({"_links": {"next": {"title": "Next"}}}))
            .unwrap_err();
        assert!(matches!(err, RepresentationError::Parse(ref msg) if msg.contains("href")));
    }

    #[test]
    fn test_rejects_scalar_embedded() {
        let err = reader()
            .read_value(&json!({"_embedded": {"item": 3}}))
            .unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_malformed_json_stream() {
        let mut input = &b"{\"a\": "[..];
        let err = reader().read(&mut input).unwrap_err();
        assert!(matches!(err, RepresentationError::Json(_)));
    }

    #[test]
    fn test_factory_namespaces_fill_gaps() {
        let factory = RepresentationFactory::new()
            .with_namespace("ns", "https://factory.example/{rel}")
            .unwrap()
            .with_namespace("doc", "https://docs.example/{rel}")
            .unwrap();
        let reader = JsonRepresentationReader::new(&factory);
        let document = json!({
            "_links": {"curies": [{"name": "ns", "href": "https://document.example/{rel}"}]}
        });
        let rep = reader.read_value(&document).unwrap();
        assert_eq!(rep.namespaces().get("ns"), Some("https://document.example/{rel}"));
        assert_eq!(rep.namespaces().get("doc"), Some("https://docs.example/{rel}"));
    }
}
