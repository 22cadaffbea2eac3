#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # HalBuilder: HAL representations for Rust
//!
//! This crate builds, renders and reads resources in the Hypertext Application
//! Language (HAL), a convention for expressing hyperlinks and embedded
//! resources inside JSON and XML documents.
//!
//! ## Overview
//!
//! A HAL resource is made of four parts:
//!
//! 1. **Links** - Relation name to target URI, possibly several per relation
//! 2. **Namespaces** - Prefixes that shorten link relations into CURIEs
//! 3. **Properties** - Arbitrary JSON-shaped state
//! 4. **Embedded resources** - Child resources grouped by relation
//!
//! A [`RepresentationFactory`] holds the defaults every new representation
//! starts with and a registry of codecs keyed by content type. Renderers and
//! readers for `application/hal+json` and `application/hal+xml` are registered
//! out of the box; more can be added or the defaults replaced.
//!
//! ## Key Features
//!
//! - **Consuming builder**: every `with_*` call returns the representation, so
//!   resources are assembled in one expression
//! - **Builder/view split**: [`Representation`] builds, [`ReadableRepresentation`]
//!   only reads; readers always hand back the read-only form
//! - **Content-type dispatch**: parameters and case are ignored, wildcard
//!   requests such as `application/*` are honoured
//! - **Sniffing**: [`RepresentationFactory::read_representation`] picks JSON or
//!   XML from the first significant byte of untyped input
//! - **Flags**: `urn:halbuilder:prettyprint` and `urn:halbuilder:stripnulls`
//!   tune renderer output
//!
//! ## Building and Rendering
//!
//! ```
//! use halbuilder::{RepresentationFactory, protocol::constants::content_types};
//!
//! let factory = RepresentationFactory::new()
//!     .with_namespace("ns", "https://example.com/rels/{rel}")?;
//!
//! let order = factory
//!     .new_representation(Some("/orders/1"))?
//!     .with_link("ns:customer", "/customers/7")?
//!     .with_property("total", 30)?
//!     .with_representation_fn("ns:item", Some("/items/1"), |item| {
//!         item.with_property("sku", "X-1")
//!     })?;
//!
//! let json = factory.render(&order, content_types::HAL_JSON)?;
//! assert!(json.starts_with(r#"{"_links":{"curies":"#));
//!
//! let xml = factory.render(&order, content_types::HAL_XML)?;
//! assert!(xml.starts_with(r#"<resource href="/orders/1""#));
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! ## Reading
//!
//! ```
//! use halbuilder::RepresentationFactory;
//!
//! let factory = RepresentationFactory::new();
//!
//! let from_json = factory.read_representation(&br#" {"_links":{"self":{"href":"/a"}}}"#[..])?;
//! let from_xml = factory.read_representation(&br#"<resource href="/a"/>"#[..])?;
//! assert_eq!(from_json.href(), from_xml.href());
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Content types, links, namespaces and the representation model
//! - **[error]** - Error types and result handling
//! - **[codec]** - Renderer and reader traits, codec registry
//! - **[factory]** - Representation factory and its configuration
//! - **[json]** - HAL+JSON renderer and reader
//! - **[xml]** - HAL+XML renderer and reader
//! - **[protocol]** - Constants, media type parsing and content sniffing

pub mod codec;
pub mod error;
pub mod factory;
pub mod json;
pub mod protocol;
pub mod types;
pub mod xml;

pub use codec::{CodecRegistry, Renderer, RepresentationReader};
pub use error::{RepresentationError, Result};
pub use factory::{FactoryConfig, LinkConfig, RepresentationFactory};
pub use types::{ContentType, Contract, Link, NamespaceManager, ReadableRepresentation, Representation};
