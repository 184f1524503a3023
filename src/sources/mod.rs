//! Library catalog sources.
//!
//! This module defines the [`CatalogSource`] trait that every catalog backend
//! implements. A source knows how to fetch one page of search results; the
//! pagination and aggregation logic in [`crate::search`] depends only on this
//! capability, so new backend API versions are added as new adapters rather
//! than by changing the search loop.
//!
//! # Available Sources
//!
//! - [`ThunderSource`] - OverDrive Thunder v2 `/libraries/{id}/media` search
//! - [`MockSource`] - scripted pages for tests
//!
//! Sources are held in a [`SourceRegistry`], which preserves configuration order.

mod registry;
mod thunder;

pub mod mock;

pub use mock::MockSource;
pub use registry::SourceRegistry;
pub use thunder::ThunderSource;

use crate::models::{PageRequest, RawPage};
use async_trait::async_trait;
use std::time::Duration;

/// The CatalogSource trait defines the interface for every library catalog backend.
///
/// # Implementing a New Source
///
/// 1. Create a struct holding the library identifier and whatever client state it needs
/// 2. Implement `id` to return the identifier used to attribute results
/// 3. Implement `fetch_page` to issue exactly one request and decode it into a [`RawPage`]
/// 4. Register the source with a [`SourceRegistry`]
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Library identifier (e.g. "lexpublib"); results are attributed to it
    fn id(&self) -> &str;

    /// Largest page size this source accepts
    fn max_page_size(&self) -> usize;

    /// Fetch one page of results.
    ///
    /// Implementations must reject `request.per_page > max_page_size()` with
    /// [`SearchError::Configuration`] before touching the network, and must
    /// not retry.
    async fn fetch_page(&self, request: &PageRequest) -> Result<RawPage, SearchError>;
}

/// Broad category of a [`SearchError`], stable across context wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input or settings; not retryable
    Configuration,
    /// Network failure, timeout, or HTTP error status
    Transport,
    /// Response body was not the expected JSON envelope
    Decode,
    /// Catalog broke the pagination contract
    Protocol,
}

/// Errors that can occur while searching catalogs
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The overall search deadline ran out
    #[error("Search deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// An error raised while searching a specific library
    #[error("library '{library}': {source}")]
    Library {
        library: String,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Attach the library id to an error, keeping its kind
    pub fn for_library(self, library: impl Into<String>) -> Self {
        match self {
            // already attributed
            e @ SearchError::Library { .. } => e,
            e => SearchError::Library {
                library: library.into(),
                source: Box::new(e),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Configuration(_) => ErrorKind::Configuration,
            SearchError::Transport(_) | SearchError::DeadlineExceeded(_) => ErrorKind::Transport,
            SearchError::Decode(_) => ErrorKind::Decode,
            SearchError::Protocol(_) => ErrorKind::Protocol,
            SearchError::Library { source, .. } => source.kind(),
        }
    }

    /// Library the error was raised for, if attributed
    pub fn library(&self) -> Option<&str> {
        match self {
            SearchError::Library { library, .. } => Some(library),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Transport(format!("request timed out: {}", err))
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_library_context() {
        let err = SearchError::Protocol("page 2 repeated".into()).for_library("lexpublib");
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.library(), Some("lexpublib"));
        assert_eq!(
            err.to_string(),
            "library 'lexpublib': Protocol error: page 2 repeated"
        );

        // wrapping twice keeps the innermost attribution
        let err = err.for_library("other");
        assert_eq!(err.library(), Some("lexpublib"));
    }

    #[test]
    fn test_deadline_is_transport() {
        let err = SearchError::DeadlineExceeded(Duration::from_secs(3));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: SearchError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
