//! Mapping catalog items onto [`LibraryResult`].

use crate::models::{LibraryResult, MediaKind, RawItem};

/// Convert one catalog item into a [`LibraryResult`] attributed to `library_id`.
///
/// The library comes from the id used for the query, never from the response.
/// A title is available only when the library owns copies and at least one of
/// them is on the shelf.
pub fn normalize(item: &RawItem, library_id: &str) -> LibraryResult {
    let long_title = if item.sort_title.is_empty() {
        item.title.clone()
    } else {
        item.sort_title.clone()
    };

    LibraryResult {
        author: item.author.clone(),
        title: item.title.clone(),
        long_title,
        library: library_id.to_string(),
        total_copies: item.owned_copies,
        is_available: item.owned_copies > 0 && item.available_copies > 0,
        available_copies: item.available_copies,
        holds_count: item.holds_count,
        estimated_wait_days: item.estimated_wait_days,
        media_type: MediaKind::from_type_id(&item.media_type.id),
    }
}
