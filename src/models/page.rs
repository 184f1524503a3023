//! Wire-level page models for the Thunder catalog search endpoint.

use serde::{Deserialize, Serialize};

/// Parameters for a single page request against one catalog.
///
/// Built fresh for every HTTP call and never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text search query
    pub query: String,

    /// 1-based page number
    pub page: u32,

    /// Items per page, bounded by [`SearchConfig::max_page_size`](crate::config::SearchConfig)
    pub per_page: usize,
}

impl PageRequest {
    /// Create a new page request
    pub fn new(query: impl Into<String>, page: u32, per_page: usize) -> Self {
        Self {
            query: query.into(),
            page,
            per_page,
        }
    }
}

/// One decoded page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub items: Vec<RawItem>,

    #[serde(default)]
    pub links: PageLinks,
}

impl RawPage {
    /// Page number of the following page, if the catalog reports one
    pub fn next_page(&self) -> Option<u32> {
        self.links.next.as_ref().map(|n| n.page)
    }
}

/// Pagination links returned alongside each page.
///
/// A missing `next` marks the last page for the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub current: Option<PageInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
}

/// A catalog item as the Thunder API reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    /// Short title
    pub title: String,

    /// Full title, including any subtitle phrases
    pub sort_title: String,

    /// First creator as "First Last"
    #[serde(rename = "firstCreatorName")]
    pub author: String,

    /// First creator as "Last, First"
    #[serde(rename = "firstCreatorSortName")]
    pub sort_author: String,

    pub is_owned: bool,
    pub owned_copies: u32,
    pub available_copies: u32,
    pub holds_count: u32,
    pub estimated_wait_days: u32,

    #[serde(rename = "type")]
    pub media_type: RawMediaType,
}

/// Media type block, e.g. `{"id": "ebook"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMediaType {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_page() {
        let body = r#"{
            "items": [{
                "title": "Dune",
                "sortTitle": "Dune: Deluxe Edition",
                "firstCreatorName": "Frank Herbert",
                "firstCreatorSortName": "Herbert, Frank",
                "isOwned": true,
                "ownedCopies": 4,
                "availableCopies": 1,
                "holdsCount": 7,
                "estimatedWaitDays": 21,
                "type": {"id": "audiobook", "name": "Audiobook"}
            }],
            "links": {"self": {"page": 1}, "next": {"page": 2}}
        }"#;

        let page: RawPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        let item = &page.items[0];
        assert_eq!(item.author, "Frank Herbert");
        assert_eq!(item.sort_author, "Herbert, Frank");
        assert_eq!(item.owned_copies, 4);
        assert_eq!(item.media_type.id, "audiobook");
        assert_eq!(page.links.current, Some(PageInfo { page: 1 }));
        assert_eq!(page.next_page(), Some(2));
    }

    #[test]
    fn test_missing_next_is_last_page() {
        let body = r#"{"items": [], "links": {"self": {"page": 3}}}"#;
        let page: RawPage = serde_json::from_str(body).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn test_sparse_item_defaults() {
        let body = r#"{"items": [{"title": "Sparse"}]}"#;
        let page: RawPage = serde_json::from_str(body).unwrap();
        let item = &page.items[0];
        assert_eq!(item.title, "Sparse");
        assert_eq!(item.owned_copies, 0);
        assert!(item.media_type.id.is_empty());
        assert_eq!(page.links, PageLinks::default());
    }

    #[test]
    fn test_malformed_body_fails() {
        assert!(serde_json::from_str::<RawPage>("{\"items\": [").is_err());
        assert!(serde_json::from_str::<RawPage>("{\"items\": 5}").is_err());
    }
}
