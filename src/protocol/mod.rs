//! HAL wire-level constants, media type parsing and content sniffing.
//!
//! # Module Organization
//!
//! ```text
//! protocol/
//! ├── constants  - Content types, reserved keys and feature flags
//! ├── media_type - Media type parsing and formatting
//! └── sniff      - First-byte format detection for untyped input
//! ```
//!
//! # Examples
//!
//! ```
//! use halbuilder::protocol::{constants::content_types, parse_media_type, sniff_format, Format};
//!
//! let (essence, params) = parse_media_type("application/hal+json; charset=utf-8");
//! assert_eq!(essence, content_types::HAL_JSON);
//! assert_eq!(params, vec![("charset".to_string(), "utf-8".to_string())]);
//!
//! assert_eq!(sniff_format(b'{'), Some(Format::Json));
//! ```

mod media_type;
mod sniff;

pub use media_type::{format_media_type, parse_media_type};
pub use sniff::{peek_first_byte, sniff_format, Format};

/// Constants shared by the representation model and the codecs.
pub mod constants {
    /// Content types pre-registered by every factory.
    pub mod content_types {
        /// HAL serialized as JSON.
        pub const HAL_JSON: &str = "application/hal+json";
        /// HAL serialized as XML.
        pub const HAL_XML: &str = "application/hal+xml";
    }

    /// Reserved member and element names of the HAL document format.
    pub mod keys {
        /// JSON member holding links.
        pub const LINKS: &str = "_links";
        /// JSON member holding embedded resources.
        pub const EMBEDDED: &str = "_embedded";
        /// Link relation listing namespace (CURIE) declarations.
        pub const CURIES: &str = "curies";
        /// Link relation identifying the resource itself.
        pub const SELF: &str = "self";
        /// XML element for a resource.
        pub const RESOURCE: &str = "resource";
        /// XML element for a link.
        pub const LINK: &str = "link";
        /// XML Schema instance namespace, used for `xsi:nil`.
        pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
    }

    /// Feature flag identifiers consulted by renderers.
    pub mod flags {
        /// Indent rendered output.
        pub const PRETTY_PRINT: &str = "urn:halbuilder:prettyprint";
        /// Omit properties whose value is null.
        pub const STRIP_NULLS: &str = "urn:halbuilder:stripnulls";
    }
}

/// Parse one of the [`constants::flags`] identifiers into a flag URI.
///
/// Flag identifiers are plain `urn:` URIs, so this only fails for strings that
/// are not URIs at all.
///
/// # Examples
///
/// ```
/// use halbuilder::protocol::{constants::flags, flag};
///
/// let pretty = flag(flags::PRETTY_PRINT).unwrap();
/// assert_eq!(pretty.as_str(), "urn:halbuilder:prettyprint");
/// ```
pub fn flag(id: &str) -> crate::Result<url::Url> {
    url::Url::parse(id)
        .map_err(|e| crate::RepresentationError::InvalidValue(format!("Invalid flag '{}': {}", id, e)))
}
