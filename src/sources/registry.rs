//! Registry holding the configured catalog sources in search order.

use std::sync::Arc;

use super::{CatalogSource, SearchError, ThunderSource};
use crate::config::SearchConfig;
use crate::utils::HttpClient;

/// Ordered set of catalog sources.
///
/// Iteration follows registration order, which is the order results are
/// returned in. Registering an id that is already present replaces the
/// existing source in place.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn CatalogSource>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a Thunder source for each configured library, sharing one HTTP client
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::from_library_ids(&config.libraries, config)
    }

    /// Build a Thunder source for each id in `ids`, sharing one HTTP client
    pub fn from_library_ids<S: AsRef<str>>(
        ids: &[S],
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let client = HttpClient::from_config(config)?;
        let mut registry = Self::new();

        for id in ids {
            let source = ThunderSource::with_client(id.as_ref(), config, client.clone())?;
            registry.register(Arc::new(source));
        }

        Ok(registry)
    }

    /// Register a source
    pub fn register(&mut self, source: Arc<dyn CatalogSource>) {
        match self.sources.iter().position(|s| s.id() == source.id()) {
            Some(idx) => self.sources[idx] = source,
            None => self.sources.push(source),
        }
    }

    /// Get a source by library id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn CatalogSource>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// Get a source by library id, returning an error if not found
    pub fn get_required(&self, id: &str) -> Result<&Arc<dyn CatalogSource>, SearchError> {
        self.get(id).ok_or_else(|| {
            SearchError::Configuration(format!("library '{}' is not configured", id))
        })
    }

    /// All sources in registration order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn CatalogSource>> {
        self.sources.iter()
    }

    /// All library ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;

    #[test]
    fn test_registry_preserves_order() {
        let config = SearchConfig::default();
        let registry =
            SourceRegistry::from_library_ids(&["lexpublib", "nypl", "kcls"], &config).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec!["lexpublib", "nypl", "kcls"]
        );
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(MockSource::new("a")));
        registry.register(Arc::new(MockSource::new("b")));
        registry.register(Arc::new(MockSource::new("a").with_max_page_size(5)));

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().max_page_size(), 5);
    }

    #[test]
    fn test_get_source() {
        let registry = SourceRegistry::from_config(&SearchConfig::default()).unwrap();

        assert!(registry.has("lexpublib"));
        assert!(registry.get("nonexistent").is_none());
        assert!(registry.get_required("nonexistent").is_err());
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_empty_library_id_rejected() {
        let result = SourceRegistry::from_library_ids(&["lexpublib", ""], &SearchConfig::default());
        assert!(result.is_err());
    }
}
