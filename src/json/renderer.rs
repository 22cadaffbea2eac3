//! HAL+JSON renderer.

use crate::codec::Renderer;
use crate::error::Result;
use crate::protocol::constants::{flags, keys};
use crate::types::{Link, ReadableRepresentation};
use serde_json::{Map, Value};

/// Renders representations as `application/hal+json`.
///
/// Honours the `PRETTY_PRINT` and `STRIP_NULLS` flags carried by the
/// representation being rendered.
///
/// # Examples
///
/// ```
/// use halbuilder::{json::JsonRenderer, Renderer, Representation};
///
/// let order = Representation::new(Some("/orders/1"))?.with_property("total", 30)?;
/// let json = JsonRenderer.render(&order)?;
/// assert_eq!(json, r#"{"_links":{"self":{"href":"/orders/1"}},"total":30}"#);
/// # Ok::<(), halbuilder::RepresentationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, representation: &ReadableRepresentation) -> Result<String> {
        let strip_nulls = representation.has_flag(flags::STRIP_NULLS);
        let value = to_hal_value(representation, strip_nulls);

        if representation.has_flag(flags::PRETTY_PRINT) {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }
}

/// Convert a representation tree into its HAL+JSON document value.
///
/// Member order is `_links`, then properties in insertion order, then
/// `_embedded`. A rel with one link or child renders as an object, a rel with
/// several as an array.
pub fn to_hal_value(representation: &ReadableRepresentation, strip_nulls: bool) -> Value {
    let mut document = Map::new();

    let links = render_links(representation);
    if !links.is_empty() {
        document.insert(keys::LINKS.to_string(), Value::Object(links));
    }

    for (name, value) in representation.properties() {
        if strip_nulls && value.is_null() {
            continue;
        }
        document.insert(name.clone(), value.clone());
    }

    let mut embedded = Map::new();
    for (rel, children) in representation.resources() {
        let mut rendered: Vec<Value> = children
            .iter()
            .map(|child| to_hal_value(child, strip_nulls))
            .collect();
        let value = if rendered.len() == 1 {
            rendered.remove(0)
        } else {
            Value::Array(rendered)
        };
        embedded.insert(rel.to_string(), value);
    }
    if !embedded.is_empty() {
        document.insert(keys::EMBEDDED.to_string(), Value::Object(embedded));
    }

    Value::Object(document)
}

fn render_links(representation: &ReadableRepresentation) -> Map<String, Value> {
    let mut links = Map::new();

    if !representation.namespaces().is_empty() {
        let curies = representation
            .namespaces()
            .iter()
            .map(|(prefix, uri)| {
                let mut curie = Map::new();
                curie.insert("name".to_string(), Value::from(prefix));
                curie.insert("href".to_string(), Value::from(uri));
                if uri.contains('{') {
                    curie.insert("templated".to_string(), Value::Bool(true));
                }
                Value::Object(curie)
            })
            .collect();
        links.insert(keys::CURIES.to_string(), Value::Array(curies));
    }

    let mut grouped: Vec<(&str, Vec<&Link>)> = Vec::new();
    for link in representation.links() {
        match grouped.iter_mut().find(|(rel, _)| *rel == link.rel()) {
            Some((_, group)) => group.push(link),
            None => grouped.push((link.rel(), vec![link])),
        }
    }

    for (rel, group) in grouped {
        let value = match group.as_slice() {
            [single] => link_value(single),
            many => Value::Array(many.iter().map(|link| link_value(link)).collect()),
        };
        links.insert(rel.to_string(), value);
    }

    links
}

fn link_value(link: &Link) -> Value {
    let mut object = Map::new();
    object.insert("href".to_string(), Value::from(link.href()));
    if link.is_templated() {
        object.insert("templated".to_string(), Value::Bool(true));
    }

    let optional = [
        ("name", link.name()),
        ("title", link.title()),
        ("hreflang", link.hreflang()),
        ("profile", link.profile()),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            object.insert(key.to_string(), Value::from(value));
        }
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::flag;
    use crate::types::Representation;
    use serde_json::json;

    #[test]
    fn test_links_group_by_rel() {
        let rep = Representation::new(Some("/orders"))
            .unwrap()
            .with_link("item", "/orders/1")
            .unwrap()
            .with_link("item", "/orders/2")
            .unwrap();
        let value = to_hal_value(&rep, false);
        assert_eq!(value["_links"]["self"], json!({"href": "/orders"}));
        assert_eq!(
            value["_links"]["item"],
            json!([{"href": "/orders/1"}, {"href": "/orders/2"}])
        );
    }

    #[test]
    fn test_curies_rendered() {
        let rep = Representation::new(None)
            .unwrap()
            .with_namespace("ns", "https://example.com/rels/{rel}")
            .unwrap();
        let value = to_hal_value(&rep, false);
        assert_eq!(
            value["_links"]["curies"],
            json!([{"name": "ns", "href": "https://example.com/rels/{rel}", "templated": true}])
        );
    }

    #[test]
    fn test_link_metadata() {
        let link = Link::new("find", "/orders{?q}")
            .unwrap()
            .with_name("search")
            .with_title("Find orders");
        assert_eq!(
            link_value(&link),
            json!({"href": "/orders{?q}", "templated": true, "name": "search", "title": "Find orders"})
        );
    }

    #[test]
    fn test_embedded_single_and_many() {
        let rep = Representation::new(None)
            .unwrap()
            .with_representation("owner", Representation::new(Some("/users/1")).unwrap())
            .unwrap()
            .with_representation("item", Representation::new(Some("/items/1")).unwrap())
            .unwrap()
            .with_representation("item", Representation::new(Some("/items/2")).unwrap())
            .unwrap();
        let value = to_hal_value(&rep, false);
        assert!(value["_embedded"]["owner"].is_object());
        assert_eq!(value["_embedded"]["item"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_empty_representation() {
        let rep = Representation::new(None).unwrap();
        assert_eq!(JsonRenderer.render(&rep).unwrap(), "{}");
    }

    #[test]
    fn test_strip_nulls_flag() {
        let rep = Representation::new(None)
            .unwrap()
            .with_flags([flag(flags::STRIP_NULLS).unwrap()].into())
            .with_property("a", Value::Null)
            .unwrap()
            .with_property("b", 1)
            .unwrap();
        assert_eq!(JsonRenderer.render(&rep).unwrap(), r#"{"b":1}"#);
    }

    #[test]
    fn test_pretty_print_flag() {
        let rep = Representation::new(None)
            .unwrap()
            .with_flags([flag(flags::PRETTY_PRINT).unwrap()].into())
            .with_property("a", 1)
            .unwrap();
        assert_eq!(JsonRenderer.render(&rep).unwrap(), "{\n  \"a\": 1\n}");
    }
}
