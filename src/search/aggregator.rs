//! Multi-library search.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::models::LibraryResult;
use crate::sources::{CatalogSource, SearchError, SourceRegistry};

use super::{normalize, search_source};

/// Searches every configured library and merges the results.
///
/// Libraries are searched one after another in registry order, one request
/// in flight at a time. `max_results` caps each library separately: three
/// libraries searched with a cap of 10 can return up to 30 results. The first
/// failure from any library aborts the whole search and no partial results
/// are returned.
#[derive(Debug, Clone)]
pub struct LibrarySearch {
    registry: SourceRegistry,
    config: SearchConfig,
}

impl LibrarySearch {
    /// Create a search over the libraries listed in `config`
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let registry = SourceRegistry::from_config(&config)?;
        Ok(Self { registry, config })
    }

    /// Create a search over an existing registry
    pub fn with_registry(registry: SourceRegistry, config: SearchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search all libraries for `query`, returning up to `max_results` per library.
    ///
    /// Results are ordered by library, then page, then position within the page.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<LibraryResult>, SearchError> {
        check_max_results(max_results)?;
        self.with_deadline(self.search_all(query, max_results))
            .await
    }

    /// Search one configured library
    pub async fn search_library(
        &self,
        library_id: &str,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<LibraryResult>, SearchError> {
        check_max_results(max_results)?;
        let source = self.registry.get_required(library_id)?;
        self.with_deadline(search_one(source.as_ref(), query, max_results))
            .await
    }

    async fn search_all(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<LibraryResult>, SearchError> {
        let mut results = Vec::new();

        for source in self.registry.all() {
            let found = search_one(source.as_ref(), query, max_results).await?;
            results.extend(found);
        }

        Ok(results)
    }

    async fn with_deadline<F>(&self, search: F) -> Result<Vec<LibraryResult>, SearchError>
    where
        F: std::future::Future<Output = Result<Vec<LibraryResult>, SearchError>>,
    {
        match self.config.search_deadline() {
            Some(deadline) => run_with_deadline(deadline, search).await,
            None => search.await,
        }
    }
}

async fn run_with_deadline<F>(
    deadline: Duration,
    search: F,
) -> Result<Vec<LibraryResult>, SearchError>
where
    F: std::future::Future<Output = Result<Vec<LibraryResult>, SearchError>>,
{
    match tokio::time::timeout(deadline, search).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Search abandoned after {:?}", deadline);
            Err(SearchError::DeadlineExceeded(deadline))
        }
    }
}

async fn search_one(
    source: &dyn CatalogSource,
    query: &str,
    max_results: usize,
) -> Result<Vec<LibraryResult>, SearchError> {
    let items = search_source(source, query, max_results)
        .await
        .map_err(|e| e.for_library(source.id()))?;

    tracing::info!(library = %source.id(), results = items.len(), "Library search complete");

    Ok(items
        .iter()
        .map(|item| normalize(item, source.id()))
        .collect())
}

fn check_max_results(max_results: usize) -> Result<(), SearchError> {
    if max_results == 0 {
        return Err(SearchError::Configuration(
            "max results must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
