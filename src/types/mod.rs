//! Core HAL value types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ContentType`] | MIME key for codec lookup |
//! | [`Link`] | Immutable hyperlink value |
//! | [`NamespaceManager`] | CURIE prefix registry |
//! | [`Representation`] | Mutable resource builder |
//! | [`ReadableRepresentation`] | Read-only resource view |

mod content_type;
mod link;
mod namespace;
mod representation;

pub use content_type::ContentType;
pub use link::Link;
pub use namespace::{split_curie, NamespaceManager};
pub use representation::{Contract, ReadableRepresentation, Representation};
