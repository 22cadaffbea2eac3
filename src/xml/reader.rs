//! HAL+XML reader.
//!
//! The document is first collected into a small element tree, then mapped
//! onto a representation. Scalar values come back as strings since the
//! format carries no type information, and an array holding a single item
//! reads back as that item.

use crate::codec::RepresentationReader;
use crate::error::{RepresentationError, Result};
use crate::factory::RepresentationFactory;
use crate::protocol::constants::keys;
use crate::types::{Link, NamespaceManager, ReadableRepresentation, Representation};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::BufRead;
use url::Url;

/// Reads `application/hal+xml` documents.
///
/// # Examples
///
/// ```
/// use halbuilder::{xml::XmlRepresentationReader, RepresentationFactory, RepresentationReader};
///
/// let factory = RepresentationFactory::new();
/// let reader = XmlRepresentationReader::new(&factory);
/// let mut input = &br#"<resource href="/a"><name>Ada</name></resource>"#[..];
/// let rep = reader.read(&mut input)?;
/// assert_eq!(rep.href(), Some("/a"));
/// assert_eq!(rep.value("name").and_then(|v| v.as_str()), Some("Ada"));
/// # Ok::<(), halbuilder::RepresentationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct XmlRepresentationReader {
    namespaces: NamespaceManager,
    flags: BTreeSet<Url>,
}

impl XmlRepresentationReader {
    /// Create a reader bound to `factory`.
    pub fn new(factory: &RepresentationFactory) -> Self {
        XmlRepresentationReader {
            namespaces: factory.namespaces().clone(),
            flags: factory.flags().clone(),
        }
    }

    fn read_resource(&self, element: &Element) -> Result<Representation> {
        let mut representation =
            Representation::new(element.attribute("href"))?.with_flags(self.flags.clone());

        for (name, value) in &element.attributes {
            if let Some(prefix) = name.strip_prefix("xmlns:") {
                if value != keys::XSI_NAMESPACE {
                    representation = representation.with_namespace(prefix, value.as_str())?;
                }
            }
        }

        let mut properties = Map::new();
        let mut embedded = Vec::new();

        for child in &element.children {
            match child.name.as_str() {
                keys::LINK => {
                    representation = representation.with_link_value(read_link(child)?);
                }
                keys::RESOURCE => {
                    let rel = child.required_attribute("rel")?;
                    embedded.push((rel, self.read_resource(child)?));
                }
                name => push_repeated(&mut properties, name, element_value(child)),
            }
        }

        for (name, value) in properties {
            representation = representation.with_property(name, value)?;
        }
        for (rel, child) in embedded {
            representation = representation.with_representation(rel, child)?;
        }

        Ok(representation)
    }
}

impl RepresentationReader for XmlRepresentationReader {
    fn read(&self, input: &mut dyn BufRead) -> Result<ReadableRepresentation> {
        let root = parse_document(input)?;
        if root.name != keys::RESOURCE {
            return Err(RepresentationError::Parse(format!(
                "expected <{}> as the document element, found <{}>",
                keys::RESOURCE,
                root.name
            )));
        }

        let mut representation = self.read_resource(&root)?;
        for (prefix, uri) in self.namespaces.iter() {
            if !representation.namespaces().contains(prefix) {
                representation = representation.with_namespace(prefix, uri)?;
            }
        }
        Ok(representation.freeze())
    }
}

/// Deepest element nesting accepted, matching serde_json's recursion limit.
const MAX_DEPTH: usize = 128;

/// Minimal owned XML element.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| RepresentationError::Parse(format!("Invalid attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = unescape_text(&String::from_utf8_lossy(&attr.value))?;
            attributes.push((key, value));
        }
        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
            attributes,
            ..Default::default()
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name).ok_or_else(|| {
            RepresentationError::Parse(format!("<{}> is missing the '{}' attribute", self.name, name))
        })
    }

    fn is_nil(&self) -> bool {
        self.attribute("xsi:nil") == Some("true")
    }
}

fn parse_document(input: &mut dyn BufRead) -> Result<Element> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(RepresentationError::Parse(
                        "content after the document element".to_string(),
                    ));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(RepresentationError::Parse(
                        "document nested too deeply".to_string(),
                    ));
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(RepresentationError::Parse(
                        "content after the document element".to_string(),
                    ));
                }
                let element = Element::from_start(&start)?;
                close_element(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    RepresentationError::Parse("unexpected closing tag".to_string())
                })?;
                close_element(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&unescape_text(&String::from_utf8_lossy(text.as_ref()))?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(data.as_ref()));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(current) = stack.last_mut() {
                    let entity = format!("&{};", String::from_utf8_lossy(reference.as_ref()));
                    current.text.push_str(&unescape_text(&entity)?);
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(RepresentationError::Parse(
            "unexpected end of document inside an element".to_string(),
        ));
    }
    root.ok_or_else(|| RepresentationError::Parse("document has no root element".to_string()))
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn unescape_text(raw: &str) -> Result<String> {
    quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| RepresentationError::Parse(format!("Invalid escape: {}", e)))
}

fn read_link(element: &Element) -> Result<Link> {
    let mut link = Link::new(element.required_attribute("rel")?, element.required_attribute("href")?)?;
    if let Some(name) = element.attribute("name") {
        link = link.with_name(name);
    }
    if let Some(title) = element.attribute("title") {
        link = link.with_title(title);
    }
    if let Some(hreflang) = element.attribute("hreflang") {
        link = link.with_hreflang(hreflang);
    }
    if let Some(profile) = element.attribute("profile") {
        link = link.with_profile(profile);
    }
    Ok(link)
}

fn element_value(element: &Element) -> Value {
    if element.is_nil() {
        return Value::Null;
    }
    if element.children.is_empty() {
        return Value::String(element.text.clone());
    }
    let mut members = Map::new();
    for child in &element.children {
        push_repeated(&mut members, &child.name, element_value(child));
    }
    Value::Object(members)
}

/// Insert `value` under `name`, turning repeated names into an array.
fn push_repeated(map: &mut Map<String, Value>, name: &str, value: Value) {
    match map.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(xml: &str) -> Result<ReadableRepresentation> {
        let reader = XmlRepresentationReader::new(&RepresentationFactory::new());
        let mut input = xml.as_bytes();
        reader.read(&mut input)
    }

    #[test]
    fn test_read_links_and_namespaces() {
        let rep = read(
            r#"<?xml version="1.0"?>
            <resource href="/orders" xmlns:ns="https://example.com/rels/{rel}">
              <link rel="ns:item" href="/orders/1" title="First"/>
              <link rel="ns:item" href="/orders/2"/>
            </resource>"#,
        )
        .unwrap();
        assert_eq!(rep.href(), Some("/orders"));
        assert_eq!(rep.namespaces().get("ns"), Some("https://example.com/rels/{rel}"));
        let items = rep.links_by_rel("ns:item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), Some("First"));
    }

    #[test]
    fn test_read_properties() {
        let rep = read(
            r#"<resource xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
              <name>Fish &amp; Chips</name>
              <address><city>Lyon</city><zip>69001</zip></address>
              <tags>a</tags><tags>b</tags>
              <note xsi:nil="true"/>
            </resource>"#,
        )
        .unwrap();
        assert_eq!(rep.value("name"), Some(&json!("Fish & Chips")));
        assert_eq!(rep.value("address"), Some(&json!({"city": "Lyon", "zip": "69001"})));
        assert_eq!(rep.value("tags"), Some(&json!(["a", "b"])));
        assert_eq!(rep.value("note"), Some(&Value::Null));
        assert!(rep.namespaces().is_empty());
    }

    #[test]
    fn test_read_embedded() {
        let rep = read(
            r#"<resource href="/orders">
              <resource rel="item" href="/items/1"><sku>A</sku></resource>
              <resource rel="item" href="/items/2"/>
            </resource>"#,
        )
        .unwrap();
        let items = rep.resources_by_rel("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value("sku"), Some(&json!("A")));
        assert_eq!(items[1].href(), Some("/items/2"));
    }

    #[test]
    fn test_wrong_root_element() {
        let err = read("<order/>").unwrap_err();
        assert!(matches!(err, RepresentationError::Parse(ref msg) if msg.contains("<order>")));
    }

    #[test]
    fn test_embedded_without_rel() {
        let err = read(r#"<resource><resource href="/x"/></resource>"#).unwrap_err();
        assert!(matches!(err, RepresentationError::Parse(ref msg) if msg.contains("rel")));
    }

    #[test]
    fn test_link_without_href() {
        let err = read(r#"<resource><link rel="next"/></resource>"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_unclosed_document() {
        let err = read("<resource><name>Ada</name>").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_mismatched_tags() {
        let err = read("<resource><name>Ada</nom></resource>").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_nesting_limit() {
        let depth = 10_000;
        let xml = format!(
            "<resource>{}{}</resource>",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        let err = read(&xml).unwrap_err();
        assert!(matches!(err, RepresentationError::Parse(ref msg) if msg.contains("nested too deeply")));
    }

    #[test]
    fn test_nesting_within_limit() {
        let depth = MAX_DEPTH - 2;
        let xml = format!(
            "<resource><a>{}x{}</a></resource>",
            "<b>".repeat(depth),
            "</b>".repeat(depth)
        );
        let rep = read(&xml).unwrap();
        assert!(rep.value("a").is_some_and(Value::is_object));
    }

    #[test]
    fn test_push_repeated() {
        let mut map = Map::new();
        push_repeated(&mut map, "a", json!(1));
        push_repeated(&mut map, "a", json!(2));
        push_repeated(&mut map, "a", json!(3));
        assert_eq!(map["a"], json!([1, 2, 3]));
    }
}
