//! Reader and renderer interfaces plus the content-type keyed registry.
//!
//! Codecs are registered as factory functions rather than types, so a
//! [`RepresentationFactory`] can instantiate a fresh reader or renderer per
//! call and bind readers to its own configuration.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Renderer`] | Serializes a representation for one content type |
//! | [`RepresentationReader`] | Parses a stream into a read-only representation |
//! | [`CodecRegistry`] | Ordered content type to factory map |
//!
//! # Examples
//!
//! ```
//! use halbuilder::{ReadableRepresentation, Renderer, RepresentationFactory, Result};
//!
//! struct TextRenderer;
//!
//! impl Renderer for TextRenderer {
//!     fn render(&self, representation: &ReadableRepresentation) -> Result<String> {
//!         Ok(representation.href().unwrap_or("(anonymous)").to_string())
//!     }
//! }
//!
//! let factory = RepresentationFactory::new().with_renderer("text/plain", || TextRenderer);
//! let order = factory.new_representation(Some("/orders/1"))?;
//! assert_eq!(factory.lookup_renderer("text/plain")?.render(&order)?, "/orders/1");
//! # Ok::<(), halbuilder::RepresentationError>(())
//! ```
//!
//! [`RepresentationFactory`]: crate::RepresentationFactory

mod registry;

pub use registry::CodecRegistry;

use crate::error::Result;
use crate::factory::RepresentationFactory;
use crate::types::ReadableRepresentation;
use std::io::BufRead;
use std::sync::Arc;

/// Serializes representations for one content type.
///
/// Renderers are default-constructible: everything they need beyond the
/// representation itself (such as pretty printing) comes from the flags the
/// representation carries.
pub trait Renderer {
    /// Render `representation` into its serialized form.
    fn render(&self, representation: &ReadableRepresentation) -> Result<String>;
}

/// Parses serialized input into a read-only representation.
///
/// Implementations consume the whole input and return an error, never
/// panic, on malformed documents.
pub trait RepresentationReader {
    /// Read one representation from `input`.
    fn read(&self, input: &mut dyn BufRead) -> Result<ReadableRepresentation>;
}

/// Produces a renderer instance.
pub type RendererFactory = Arc<dyn Fn() -> Box<dyn Renderer> + Send + Sync>;

/// Produces a reader bound to the factory that requested it.
pub type ReaderFactory =
    Arc<dyn Fn(&RepresentationFactory) -> Box<dyn RepresentationReader> + Send + Sync>;
