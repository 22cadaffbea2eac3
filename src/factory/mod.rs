//! The representation factory: defaults, codec dispatch and content sniffing.
//!
//! A [`RepresentationFactory`] is configured once, typically at startup, and
//! then used to stamp out representations and to select codecs:
//!
//! 1. **Defaults**: namespaces, links and flags copied into every new
//!    representation
//! 2. **Writing**: [`lookup_renderer`](RepresentationFactory::lookup_renderer)
//!    picks a renderer by content type
//! 3. **Reading**: [`read_representation`](RepresentationFactory::read_representation)
//!    sniffs the first significant byte of untyped input and delegates to the
//!    matching reader
//!
//! # Examples
//!
//! ```
//! use halbuilder::{RepresentationFactory, protocol::constants::content_types};
//!
//! let factory = RepresentationFactory::new()
//!     .with_namespace("ns", "https://example.com/rels/{rel}")?
//!     .with_link("help", "/docs")?;
//!
//! let order = factory
//!     .new_representation(Some("/orders/1"))?
//!     .with_property("total", 30)?;
//!
//! let json = factory.render(&order, content_types::HAL_JSON)?;
//! let back = factory.read_representation(json.as_bytes())?;
//! assert_eq!(back.href(), Some("/orders/1"));
//! assert_eq!(back.link_by_rel("help").map(|l| l.href()), Some("/docs"));
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! # Thread Safety
//!
//! The factory is `Send + Sync`. Configuration methods take the factory by
//! value, so once it is shared behind a reference only the read paths
//! (`new_representation`, `lookup_renderer`, `read_representation`) remain.

mod config;

pub use config::{FactoryConfig, LinkConfig};

use crate::codec::{CodecRegistry, ReaderFactory, Renderer, RendererFactory, RepresentationReader};
use crate::error::{RepresentationError, Result};
use crate::json::{JsonRenderer, JsonRepresentationReader};
use crate::protocol::constants::content_types;
use crate::protocol::{peek_first_byte, sniff_format};
use crate::types::{ContentType, Link, NamespaceManager, ReadableRepresentation, Representation};
use crate::xml::{XmlRenderer, XmlRepresentationReader};
use std::collections::BTreeSet;
use std::io::{BufReader, Read};
use std::sync::Arc;
use url::Url;

/// Entry point for building, rendering and reading HAL representations.
#[derive(Clone, Debug)]
pub struct RepresentationFactory {
    namespaces: NamespaceManager,
    links: Vec<Link>,
    flags: BTreeSet<Url>,
    renderers: CodecRegistry<RendererFactory>,
    readers: CodecRegistry<ReaderFactory>,
    enable_logging: bool,
}

impl RepresentationFactory {
    /// Create a factory with the HAL+JSON and HAL+XML codecs registered.
    pub fn new() -> Self {
        RepresentationFactory {
            namespaces: NamespaceManager::new(),
            links: Vec::new(),
            flags: BTreeSet::new(),
            renderers: CodecRegistry::new(),
            readers: CodecRegistry::new(),
            enable_logging: false,
        }
        .with_renderer(content_types::HAL_JSON, || JsonRenderer)
        .with_renderer(content_types::HAL_XML, || XmlRenderer)
        .with_reader(content_types::HAL_JSON, JsonRepresentationReader::new)
        .with_reader(content_types::HAL_XML, XmlRepresentationReader::new)
    }

    /// Create a factory from a configuration, on top of the default codecs.
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        let mut factory = RepresentationFactory::new();
        factory.enable_logging = config.enable_logging;

        for (prefix, uri) in &config.namespaces {
            factory = factory.with_namespace(prefix.as_str(), uri.as_str())?;
        }
        for entry in &config.links {
            factory = factory.with_link_value(entry.to_link()?);
        }
        for flag in &config.flags {
            factory = factory.with_flag(flag.clone());
        }
        Ok(factory)
    }

    // ========== Configuration ==========

    /// Register a default namespace.
    ///
    /// Fails with [`RepresentationError::DuplicateNamespace`] if the prefix is
    /// already registered on this factory.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Result<Self> {
        self.namespaces.add(prefix, uri)?;
        Ok(self)
    }

    /// Register a default link.
    pub fn with_link(self, rel: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        Ok(self.with_link_value(Link::new(rel, href)?))
    }

    /// Register a fully described default link.
    pub fn with_link_value(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Set a feature flag.
    pub fn with_flag(mut self, flag: Url) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Enable or disable dispatch logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Register a renderer for `content_type`, replacing any earlier one.
    pub fn with_renderer<F, R>(mut self, content_type: impl Into<ContentType>, factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Renderer + 'static,
    {
        let factory: RendererFactory = Arc::new(move || Box::new(factory()) as Box<dyn Renderer>);
        self.renderers.register(content_type.into(), factory);
        self
    }

    /// Register a reader for `content_type`, replacing any earlier one.
    ///
    /// The factory function receives the factory performing the read, so the
    /// reader can pick up its defaults.
    pub fn with_reader<F, R>(mut self, content_type: impl Into<ContentType>, factory: F) -> Self
    where
        F: Fn(&RepresentationFactory) -> R + Send + Sync + 'static,
        R: RepresentationReader + 'static,
    {
        let factory: ReaderFactory = Arc::new(move |owner: &RepresentationFactory| {
            Box::new(factory(owner)) as Box<dyn RepresentationReader>
        });
        self.readers.register(content_type.into(), factory);
        self
    }

    // ========== Accessors ==========

    /// Default namespaces.
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Default links, in registration order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Feature flags.
    pub fn flags(&self) -> &BTreeSet<Url> {
        &self.flags
    }

    /// Content types with a registered renderer.
    pub fn renderer_types(&self) -> impl Iterator<Item = &ContentType> {
        self.renderers.content_types()
    }

    /// Content types with a registered reader.
    pub fn reader_types(&self) -> impl Iterator<Item = &ContentType> {
        self.readers.content_types()
    }

    // ========== Building ==========

    /// Create a representation seeded with the factory defaults.
    ///
    /// Namespaces are copied in prefix order and links in registration
    /// order, after the `self` link when `href` is given. The copy is
    /// independent: changing the representation never touches the factory.
    pub fn new_representation(&self, href: Option<&str>) -> Result<Representation> {
        let mut representation = Representation::new(href)?.with_flags(self.flags.clone());

        for (prefix, uri) in self.namespaces.iter() {
            representation = representation.with_namespace(prefix, uri)?;
        }
        for link in &self.links {
            representation = representation.with_link_value(link.clone());
        }

        Ok(representation)
    }

    /// Create a representation addressed by a parsed URL.
    pub fn new_representation_url(&self, href: &Url) -> Result<Representation> {
        self.new_representation(Some(href.as_str()))
    }

    // ========== Writing ==========

    /// Instantiate the renderer for `content_type`.
    ///
    /// Returns the first registered renderer whose content type matches; fails
    /// with [`RepresentationError::UnsupportedContentType`] when none does.
    pub fn lookup_renderer(&self, content_type: &str) -> Result<Box<dyn Renderer>> {
        let (key, factory) = self
            .renderers
            .lookup(content_type)
            .ok_or_else(|| RepresentationError::UnsupportedContentType(content_type.to_string()))?;

        if self.enable_logging {
            tracing::debug!("Selected renderer {} for requested type {}", key, content_type);
        }

        Ok(factory())
    }

    /// Render `representation` as `content_type`.
    pub fn render(&self, representation: &ReadableRepresentation, content_type: &str) -> Result<String> {
        self.lookup_renderer(content_type)?.render(representation)
    }

    // ========== Reading ==========

    /// Instantiate the reader for `content_type`, bound to this factory.
    pub fn lookup_reader(&self, content_type: &str) -> Result<Box<dyn RepresentationReader>> {
        let (key, factory) = self
            .readers
            .lookup(content_type)
            .ok_or_else(|| RepresentationError::UnsupportedContentType(content_type.to_string()))?;

        if self.enable_logging {
            tracing::debug!("Selected reader {} for requested type {}", key, content_type);
        }

        Ok(factory(self))
    }

    /// Read a representation from untyped input.
    ///
    /// The first non-whitespace byte selects the reader: `{` the reader
    /// registered for HAL+JSON, `<` the one for HAL+XML. Any other byte, or
    /// empty input, fails with [`RepresentationError::Parse`]. The stream is
    /// consumed fully by the selected reader.
    pub fn read_representation<R: Read>(&self, input: R) -> Result<ReadableRepresentation> {
        let mut input = BufReader::new(input);
        let first = peek_first_byte(&mut input)?;

        let format = first.and_then(sniff_format).ok_or_else(|| {
            RepresentationError::Parse(format!(
                "unrecognized initial character in stream: {}",
                describe_byte(first)
            ))
        })?;

        let content_type = ContentType::new(format.content_type());
        let factory = self
            .readers
            .get(&content_type)
            .ok_or_else(|| RepresentationError::UnsupportedContentType(content_type.to_string()))?;

        if self.enable_logging {
            tracing::debug!("Sniffed {:?} input, reading as {}", format, content_type);
        }

        factory(self).read(&mut input)
    }

    /// Read a representation whose content type is known.
    pub fn read_representation_as<R: Read>(&self, content_type: &str, input: R) -> Result<ReadableRepresentation> {
        let reader = self.lookup_reader(content_type)?;
        let mut input = BufReader::new(input);
        reader.read(&mut input)
    }
}

impl Default for RepresentationFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_byte(byte: Option<u8>) -> String {
    match byte {
        Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
        Some(b) => format!("0x{:02x}", b),
        None => "end of input".to_string(),
    }
}
