//! HAL+XML renderer.

use crate::codec::Renderer;
use crate::error::{RepresentationError, Result};
use crate::protocol::constants::{flags, keys};
use crate::types::{Link, ReadableRepresentation};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

/// Renders representations as `application/hal+xml`.
///
/// Honours the `PRETTY_PRINT` and `STRIP_NULLS` flags carried by the
/// representation being rendered.
///
/// # Examples
///
/// ```
/// use halbuilder::{xml::XmlRenderer, Renderer, Representation};
///
/// let order = Representation::new(Some("/orders/1"))?
///     .with_link("customer", "/customers/7")?
///     .with_property("total", 30)?;
/// let xml = XmlRenderer.render(&order)?;
/// assert_eq!(
///     xml,
///     r#"<resource href="/orders/1"><link rel="customer" href="/customers/7"/><total>30</total></resource>"#
/// );
/// # Ok::<(), halbuilder::RepresentationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl Renderer for XmlRenderer {
    fn render(&self, representation: &ReadableRepresentation) -> Result<String> {
        let strip_nulls = representation.has_flag(flags::STRIP_NULLS);
        let mut writer = if representation.has_flag(flags::PRETTY_PRINT) {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };

        let context = RenderContext {
            strip_nulls,
            declare_xsi: needs_xsi(representation, strip_nulls),
        };
        write_resource(&mut writer, representation, None, &context, true)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| RepresentationError::Render(format!("XML output is not UTF-8: {}", e)))
    }
}

struct RenderContext {
    strip_nulls: bool,
    declare_xsi: bool,
}

fn write_resource(
    writer: &mut Writer<Vec<u8>>,
    representation: &ReadableRepresentation,
    rel: Option<&str>,
    context: &RenderContext,
    root: bool,
) -> Result<()> {
    let mut element = BytesStart::new(keys::RESOURCE);
    if let Some(rel) = rel {
        element.push_attribute(("rel", rel));
    }
    if let Some(href) = representation.href() {
        element.push_attribute(("href", href));
    }
    for (prefix, uri) in representation.namespaces().iter() {
        element.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
    }
    if root && context.declare_xsi {
        element.push_attribute(("xmlns:xsi", keys::XSI_NAMESPACE));
    }

    // The first self link is carried by the href attribute; any others stay links.
    let href_link = representation
        .links()
        .iter()
        .position(|link| link.rel() == keys::SELF);
    let body_links: Vec<&Link> = representation
        .links()
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != href_link)
        .map(|(_, link)| link)
        .collect();
    let has_body = !body_links.is_empty()
        || representation
            .properties()
            .values()
            .any(|value| !(context.strip_nulls && value.is_null()))
        || representation.resources().next().is_some();

    if !has_body {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;

    for link in body_links {
        write_link(writer, link)?;
    }

    for (name, value) in representation.properties() {
        if context.strip_nulls && value.is_null() {
            continue;
        }
        check_property_name(name)?;
        write_value(writer, name, value)?;
    }

    for (rel, children) in representation.resources() {
        for child in children {
            write_resource(writer, child, Some(rel), context, false)?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new(keys::RESOURCE)))?;
    Ok(())
}

fn write_link(writer: &mut Writer<Vec<u8>>, link: &Link) -> Result<()> {
    let mut element = BytesStart::new(keys::LINK);
    element.push_attribute(("rel", link.rel()));
    element.push_attribute(("href", link.href()));

    let optional = [
        ("name", link.name()),
        ("title", link.title()),
        ("hreflang", link.hreflang()),
        ("profile", link.profile()),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            element.push_attribute((key, value));
        }
    }
    if link.is_templated() {
        element.push_attribute(("templated", "true"));
    }

    writer.write_event(Event::Empty(element))?;
    Ok(())
}

/// Write one property. Arrays repeat the element once per item.
fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    check_element_name(name)?;

    match value {
        Value::Null => {
            let mut element = BytesStart::new(name);
            element.push_attribute(("xsi:nil", "true"));
            writer.write_event(Event::Empty(element))?;
        }
        Value::Array(items) => {
            for item in items {
                write_value(writer, name, item)?;
            }
        }
        Value::Object(members) if members.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
        }
        Value::Object(members) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (member, value) in members {
                write_value(writer, member, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if text.is_empty() {
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            } else {
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
    }
    Ok(())
}

/// Top-level properties share the element namespace of links and embedded
/// resources, so those two names are unavailable to them.
fn check_property_name(name: &str) -> Result<()> {
    if name == keys::LINK || name == keys::RESOURCE {
        return Err(RepresentationError::Render(format!(
            "property name '{}' collides with the <{}> element",
            name, name
        )));
    }
    Ok(())
}

/// Property names become element names, so they must be XML names.
fn check_element_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(RepresentationError::Render(format!(
            "property name '{}' is not a valid XML element name",
            name
        )))
    }
}

/// Whether any rendered value anywhere in the tree is null.
fn needs_xsi(representation: &ReadableRepresentation, strip_nulls: bool) -> bool {
    let in_properties = representation.properties().values().any(|value| {
        if value.is_null() {
            !strip_nulls
        } else {
            contains_null(value)
        }
    });
    in_properties
        || representation
            .resources()
            .flat_map(|(_, children)| children)
            .any(|child| needs_xsi(child, strip_nulls))
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(members) => members.values().any(contains_null),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::flag;
    use crate::types::Representation;
    use serde_json::json;

    #[test]
    fn test_empty_representation() {
        let rep = Representation::new(None).unwrap();
        assert_eq!(XmlRenderer.render(&rep).unwrap(), "<resource/>");
    }

    #[test]
    fn test_namespaces_and_links() {
        let rep = Representation::new(Some("/orders"))
            .unwrap()
            .with_namespace("ns", "https://example.com/rels/{rel}")
            .unwrap()
            .with_link_value(Link::new("ns:find", "/orders{?q}").unwrap().with_title("Find"));
        let xml = XmlRenderer.render(&rep).unwrap();
        assert!(xml.starts_with(
            r#"<resource href="/orders" xmlns:ns="https://example.com/rels/{rel}">"#
        ));
        assert!(xml.contains(r#"<link rel="ns:find" href="/orders{?q}" title="Find" templated="true"/>"#));
    }

    #[test]
    fn test_nested_values() {
        let rep = Representation::new(None)
            .unwrap()
            .with_property("address", json!({"city": "Lyon", "zip": "69001"}))
            .unwrap()
            .with_property("tags", json!(["a", "b"]))
            .unwrap()
            .with_property("paid", true)
            .unwrap();
        let xml = XmlRenderer.render(&rep).unwrap();
        assert_eq!(
            xml,
            "<resource><address><city>Lyon</city><zip>69001</zip></address>\
             <tags>a</tags><tags>b</tags><paid>true</paid></resource>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let rep = Representation::new(None)
            .unwrap()
            .with_property("name", "Fish & <Chips>")
            .unwrap();
        let xml = XmlRenderer.render(&rep).unwrap();
        assert!(xml.contains("<name>Fish &amp; &lt;Chips&gt;</name>"));
    }

    #[test]
    fn test_null_declares_xsi() {
        let rep = Representation::new(None)
            .unwrap()
            .with_property("note", Value::Null)
            .unwrap();
        let xml = XmlRenderer.render(&rep).unwrap();
        assert!(xml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
        assert!(xml.contains(r#"<note xsi:nil="true"/>"#));
    }

    #[test]
    fn test_strip_nulls_drops_xsi() {
        let rep = Representation::new(None)
            .unwrap()
            .with_flags([flag(flags::STRIP_NULLS).unwrap()].into())
            .with_property("note", Value::Null)
            .unwrap();
        assert_eq!(XmlRenderer.render(&rep).unwrap(), "<resource/>");
    }

    #[test]
    fn test_embedded_resources() {
        let rep = Representation::new(Some("/orders"))
            .unwrap()
            .with_representation("item", Representation::new(Some("/items/1")).unwrap())
            .unwrap()
            .with_representation("item", Representation::new(Some("/items/2")).unwrap())
            .unwrap();
        let xml = XmlRenderer.render(&rep).unwrap();
        assert_eq!(
            xml,
            r#"<resource href="/orders"><resource rel="item" href="/items/1"/><resource rel="item" href="/items/2"/></resource>"#
        );
    }

    #[test]
    fn test_invalid_property_name() {
        let rep = Representation::new(None)
            .unwrap()
            .with_property("first name", "Ada")
            .unwrap();
        let err = XmlRenderer.render(&rep).unwrap_err();
        assert!(matches!(err, RepresentationError::Render(_)));
    }

    #[test]
    fn test_reserved_element_names() {
        for name in [keys::LINK, keys::RESOURCE] {
            let rep = Representation::new(Some("/a"))
                .unwrap()
                .with_property(name, "x")
                .unwrap();
            let err = XmlRenderer.render(&rep).unwrap_err();
            assert!(matches!(err, RepresentationError::Render(ref msg) if msg.contains(name)));
        }
    }

    #[test]
    fn test_nested_member_may_be_named_link() {
        let rep = Representation::new(None)
            .unwrap()
            .with_property("meta", json!({"link": "x"}))
            .unwrap();
        assert_eq!(
            XmlRenderer.render(&rep).unwrap(),
            "<resource><meta><link>x</link></meta></resource>"
        );
    }

    #[test]
    fn test_extra_self_links_kept() {
        let rep = Representation::new(Some("/orders/1"))
            .unwrap()
            .with_link("self", "/orders/one")
            .unwrap();
        assert_eq!(
            XmlRenderer.render(&rep).unwrap(),
            r#"<resource href="/orders/1"><link rel="self" href="/orders/one"/></resource>"#
        );
    }

    #[test]
    fn test_pretty_print_flag() {
        let rep = Representation::new(None)
            .unwrap()
            .with_flags([flag(flags::PRETTY_PRINT).unwrap()].into())
            .with_property("a", 1)
            .unwrap();
        assert_eq!(XmlRenderer.render(&rep).unwrap(), "<resource>\n  <a>1</a>\n</resource>");
    }
}
