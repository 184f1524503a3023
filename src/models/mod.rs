//! Core data models for catalog pages and search results.

mod page;
mod result;

pub use page::{PageInfo, PageLinks, PageRequest, RawItem, RawMediaType, RawPage};
pub use result::{LibraryResult, MediaKind};
