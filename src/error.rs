//! Error types for building, rendering and reading HAL representations.
//!
//! Every fallible operation in this crate returns [`Result`], so callers have a
//! single error type to match on regardless of which codec produced the failure.
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Construction | `DuplicateNamespace`, `DuplicateProperty`, `InvalidLink`, `InvalidValue` |
//! | Dispatch | `UnsupportedContentType` |
//! | Reading | `Parse`, `Json`, `Xml`, `Io` |
//! | Rendering | `Render` |
//!
//! # Examples
//!
//! ```
//! use halbuilder::RepresentationError;
//!
//! let err = RepresentationError::Parse("unrecognized initial character in stream: '1'".into());
//! assert!(err.is_parse_error());
//! assert!(!err.is_duplicate());
//! ```

use std::io;
use thiserror::Error;

/// Result type for HAL operations.
///
/// Shorthand for `Result<T, RepresentationError>`.
pub type Result<T> = std::result::Result<T, RepresentationError>;

/// Errors that can occur while building, rendering or reading a representation.
///
/// Nothing in the crate retries or recovers: the first failure aborts the
/// current build or parse and is returned to the caller as one of these.
///
/// # Examples
///
/// ```
/// use halbuilder::{RepresentationError, RepresentationFactory};
///
/// let factory = RepresentationFactory::new();
/// match factory.lookup_renderer("application/unknown+foo") {
///     Err(RepresentationError::UnsupportedContentType(ct)) => {
///         assert_eq!(ct, "application/unknown+foo");
///     }
///     _ => panic!("expected an unsupported content type"),
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RepresentationError {
    /// A namespace prefix was registered twice on the same factory or representation.
    #[error("Duplicate namespace '{0}'")]
    DuplicateNamespace(String),

    /// A property name was added twice to the same representation.
    #[error("Duplicate property '{0}'")]
    DuplicateProperty(String),

    /// A link was constructed with an empty rel or href.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// A value could not be turned into representation properties.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// No renderer or reader is registered for the requested content type.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The input could not be recognized or parsed as a representation.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A renderer failed to produce output.
    #[error("Render error: {0}")]
    Render(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML encoding or decoding failed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Reading the input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RepresentationError {
    /// Check if this error came from reading malformed or unrecognized input.
    ///
    /// # Examples
    ///
    /// ```
    /// use halbuilder::RepresentationError;
    ///
    /// assert!(RepresentationError::Parse("bad".into()).is_parse_error());
    /// assert!(!RepresentationError::DuplicateProperty("name".into()).is_parse_error());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RepresentationError::Parse(_)
                | RepresentationError::Json(_)
                | RepresentationError::Xml(_)
        )
    }

    /// Check if this error is a duplicate namespace or property registration.
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            RepresentationError::DuplicateNamespace(_) | RepresentationError::DuplicateProperty(_)
        )
    }
}
