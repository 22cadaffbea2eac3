//! Content-type keyed codec registry.
//!
//! Entries keep registration order. Registering an exact content type again
//! replaces the earlier entry in place, and lookups return the first entry
//! whose key matches the requested type.

use crate::types::ContentType;
use std::fmt;

/// Ordered map from [`ContentType`] to a codec factory.
#[derive(Clone)]
pub struct CodecRegistry<F> {
    entries: Vec<(ContentType, F)>,
}

impl<F> CodecRegistry<F> {
    /// Create an empty registry
    pub fn new() -> Self {
        CodecRegistry { entries: Vec::new() }
    }

    /// Register `factory` for `content_type`; the last registration for an
    /// exact content type wins.
    pub fn register(&mut self, content_type: ContentType, factory: F) {
        match self.entries.iter_mut().find(|(key, _)| *key == content_type) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((content_type, factory)),
        }
    }

    /// Find the first entry whose key matches `requested`.
    ///
    /// Matching ignores parameters and case and honours wildcard requests,
    /// see [`ContentType::matches`].
    pub fn lookup(&self, requested: &str) -> Option<(&ContentType, &F)> {
        self.entries
            .iter()
            .find(|(key, _)| key.matches(requested))
            .map(|(key, factory)| (key, factory))
    }

    /// Entry registered under exactly `content_type`.
    pub fn get(&self, content_type: &ContentType) -> Option<&F> {
        self.entries
            .iter()
            .find(|(key, _)| key == content_type)
            .map(|(_, factory)| factory)
    }

    /// Registered content types in registration order.
    pub fn content_types(&self) -> impl Iterator<Item = &ContentType> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Number of registered content types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for CodecRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for CodecRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key.to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_registration_wins() {
        let mut registry = CodecRegistry::new();
        registry.register(ContentType::new("application/hal+json"), 1);
        registry.register(ContentType::new("application/hal+xml"), 2);
        registry.register(ContentType::new("Application/HAL+JSON"), 3);

        assert_eq!(registry.len(), 2);
        let (_, value) = registry.lookup("application/hal+json").unwrap();
        assert_eq!(*value, 3);
    }

    #[test]
    fn test_lookup_ignores_parameters() {
        let mut registry = CodecRegistry::new();
        registry.register(ContentType::new("application/hal+json"), "json");
        let (key, value) = registry.lookup("application/hal+json; charset=utf-8").unwrap();
        assert_eq!(key.essence(), "application/hal+json");
        assert_eq!(*value, "json");
    }

    #[test]
    fn test_lookup_miss() {
        let mut registry = CodecRegistry::new();
        registry.register(ContentType::new("application/hal+json"), ());
        assert!(registry.lookup("application/unknown+foo").is_none());
    }

    #[test]
    fn test_exact_get_and_order() {
        let mut registry = CodecRegistry::new();
        registry.register(ContentType::new("b/b"), 'b');
        registry.register(ContentType::new("a/a"), 'a');
        assert_eq!(registry.get(&ContentType::new("a/a")), Some(&'a'));
        let keys: Vec<_> = registry.content_types().map(|k| k.essence().to_string()).collect();
        assert_eq!(keys, vec!["b/b", "a/a"]);
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut registry = CodecRegistry::new();
        registry.register(ContentType::new("application/hal+json"), ());
        assert!(format!("{:?}", registry).contains("application/hal+json"));
    }
}
