//! Federated catalog search.
//!
//! - [`Paginator`] / [`search_source`]: collect up to N items from one library
//! - [`normalize`]: map a catalog item onto [`LibraryResult`](crate::models::LibraryResult)
//! - [`LibrarySearch`]: search every configured library in order and merge the results

mod aggregator;
mod normalize;
mod paginator;

pub use aggregator::LibrarySearch;
pub use normalize::normalize;
pub use paginator::{search_source, PaginationState, Paginator};
