//! # Library Search
//!
//! Answers "does any of my libraries have this book, and how soon can I get it?"
//! by searching the digital catalog of each configured library and returning
//! one ordered list of results.
//!
//! ## Architecture
//!
//! - [`sources`]: the [`CatalogSource`] trait, the Thunder API adapter, and the ordered [`SourceRegistry`]
//! - [`search`]: per-library pagination, normalization, and the multi-library [`LibrarySearch`]
//! - [`models`]: wire pages and the unified [`LibraryResult`]
//! - [`config`]: [`SearchConfig`](config::SearchConfig) and file/environment loading
//! - [`utils`]: HTTP client and output rendering
//!
//! ```rust,no_run
//! use library_search::config::SearchConfig;
//! use library_search::LibrarySearch;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SearchConfig::default().libraries(["lexpublib", "nypl"]);
//! let search = LibrarySearch::new(config)?;
//! for result in search.search("robert henderson", 10).await? {
//!     println!("{} at {}: available={}", result.title, result.library, result.is_available);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod search;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::LibraryResult;
pub use search::LibrarySearch;
pub use sources::{CatalogSource, ErrorKind, SearchError, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
