//! Content type value used as the codec registry key.
//!
//! A [`ContentType`] is identified by its essence (`type/subtype`, compared
//! case-insensitively). Parameters such as `charset` or `profile` are kept for
//! inspection but never take part in equality, ordering or matching.
//!
//! # Examples
//!
//! ```
//! use halbuilder::ContentType;
//!
//! let hal = ContentType::new("application/hal+json");
//! assert!(hal.matches("application/hal+json;charset=utf-8"));
//! assert!(hal.matches("APPLICATION/HAL+JSON"));
//! assert!(!hal.matches("application/hal+xml"));
//!
//! // Wildcard candidates, as found in Accept headers
//! assert!(hal.matches("*/*"));
//! assert!(hal.matches("application/*"));
//! ```

use crate::protocol::{format_media_type, parse_media_type};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A MIME content type.
#[derive(Debug, Clone)]
pub struct ContentType {
    /// Lower-cased `type/subtype`
    essence: String,
    /// Parameters in declaration order
    params: Vec<(String, String)>,
}

impl ContentType {
    /// Create a content type from a MIME string.
    ///
    /// Never fails: malformed strings are kept as opaque essences and simply
    /// match nothing but themselves.
    pub fn new(mime: impl AsRef<str>) -> Self {
        let (essence, params) = parse_media_type(mime.as_ref());
        ContentType { essence, params }
    }

    /// The lower-cased `type/subtype` part.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// The primary type (`application` in `application/hal+json`).
    pub fn main_type(&self) -> &str {
        self.essence.split('/').next().unwrap_or("")
    }

    /// The subtype (`hal+json` in `application/hal+json`), empty when absent.
    pub fn sub_type(&self) -> &str {
        self.essence.split_once('/').map(|(_, sub)| sub).unwrap_or("")
    }

    /// Look up a parameter by case-insensitive name.
    ///
    /// ```
    /// use halbuilder::ContentType;
    ///
    /// let ct = ContentType::new("application/hal+json; Profile=urn:orders");
    /// assert_eq!(ct.parameter("profile"), Some("urn:orders"));
    /// assert_eq!(ct.parameter("charset"), None);
    /// ```
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check whether `candidate` names this content type.
    ///
    /// True when the candidate's essence equals this one ignoring case and
    /// parameters, or when the candidate is `*/*` or `type/*` for this type.
    pub fn matches(&self, candidate: &str) -> bool {
        let (essence, _) = parse_media_type(candidate);
        if essence == self.essence {
            return true;
        }
        match essence.split_once('/') {
            Some(("*", "*")) => true,
            Some((main, "*")) => main == self.main_type(),
            _ => false,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_media_type(&self.essence, &self.params))
    }
}

impl PartialEq for ContentType {
    fn eq(&self, other: &Self) -> bool {
        self.essence == other.essence
    }
}

impl Eq for ContentType {}

impl Hash for ContentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.essence.hash(state);
    }
}

impl PartialOrd for ContentType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContentType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.essence.cmp(&other.essence)
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        ContentType::new(s)
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        ContentType::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_params_and_case() {
        let a = ContentType::new("application/hal+json");
        let b = ContentType::new("Application/HAL+JSON; charset=utf-8");
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_parameterized_candidate() {
        let ct = ContentType::new("application/hal+json");
        assert!(ct.matches("application/hal+json"));
        assert!(ct.matches("application/hal+json;charset=utf-8"));
        assert!(ct.matches("application/hal+json;profile=\"urn:x\""));
        assert!(!ct.matches("application/hal+xml"));
    }

    #[test]
    fn test_wildcards() {
        let ct = ContentType::new("application/hal+xml");
        assert!(ct.matches("*/*"));
        assert!(ct.matches("application/*"));
        assert!(!ct.matches("text/*"));
    }

    #[test]
    fn test_malformed_is_opaque() {
        let ct = ContentType::new("not a mime");
        assert!(ct.matches("not a mime"));
        assert!(!ct.matches("application/hal+json"));
        assert_eq!(ct.sub_type(), "");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut types = vec![
            ContentType::new("application/hal+xml"),
            ContentType::new("application/hal+json"),
        ];
        types.sort();
        assert_eq!(types[0].essence(), "application/hal+json");
    }

    #[test]
    fn test_display_keeps_params() {
        let ct = ContentType::new("application/hal+json;charset=utf-8");
        assert_eq!(ct.to_string(), "application/hal+json; charset=utf-8");
        assert_eq!(ct.main_type(), "application");
        assert_eq!(ct.sub_type(), "hal+json");
    }
}
