//! Single-library pagination.
//!
//! The loop is an explicit state machine: `Fetching(n)` moves to
//! `Fetching(next)` only when the catalog reports a `next` page that is
//! strictly greater than `n` and has not been seen before. Anything else
//! ends in `Failed` with a protocol error, so a misbehaving catalog cannot
//! keep the loop alive.

use std::collections::HashSet;

use crate::models::{PageRequest, RawItem, RawPage};
use crate::sources::{CatalogSource, SearchError};

/// Where a [`Paginator`] is in its walk through the result pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// The given page is to be fetched next
    Fetching(u32),
    /// Enough items were collected or the last page was reached
    Done,
    /// A fetch failed or the catalog broke the pagination contract
    Failed,
}

/// Collects up to `max_results` items from one source, page by page.
#[derive(Debug)]
pub struct Paginator<'a> {
    source: &'a dyn CatalogSource,
    query: String,
    max_results: usize,
    page_size: usize,
    state: PaginationState,
    visited: HashSet<u32>,
    items: Vec<RawItem>,
}

impl<'a> Paginator<'a> {
    /// Start a walk at page 1 using the source's maximum page size.
    ///
    /// `max_results == 0` is a caller error and is rejected here rather than
    /// returning an empty list.
    pub fn new(
        source: &'a dyn CatalogSource,
        query: impl Into<String>,
        max_results: usize,
    ) -> Result<Self, SearchError> {
        if max_results == 0 {
            return Err(SearchError::Configuration(
                "max results must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            source,
            query: query.into(),
            max_results,
            page_size: source.max_page_size(),
            state: PaginationState::Fetching(1),
            visited: HashSet::new(),
            items: Vec::new(),
        })
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Items collected so far, in fetch order
    pub fn items(&self) -> &[RawItem] {
        &self.items
    }

    /// Fetch the current page and advance the state.
    ///
    /// Does nothing once the walk is `Done` or `Failed`.
    pub async fn step(&mut self) -> Result<PaginationState, SearchError> {
        let page_number = match self.state {
            PaginationState::Fetching(n) => n,
            state => return Ok(state),
        };

        let request = PageRequest::new(self.query.as_str(), page_number, self.page_size);
        let page = match self.source.fetch_page(&request).await {
            Ok(page) => page,
            Err(e) => {
                self.state = PaginationState::Failed;
                return Err(e);
            }
        };
        self.visited.insert(page_number);

        match self.advance(page_number, page) {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(library = %self.source.id(), "Pagination aborted: {}", e);
                self.state = PaginationState::Failed;
                Err(e)
            }
        }
    }

    fn advance(&mut self, current: u32, page: RawPage) -> Result<PaginationState, SearchError> {
        // Ordering is judged against the page we asked for; `links.self` is
        // informational and a differing value is only logged.
        if let Some(reported) = page.links.current.map(|p| p.page) {
            if reported != current {
                tracing::debug!(
                    library = %self.source.id(),
                    requested = current,
                    reported,
                    "Catalog reported a different page number"
                );
            }
        }

        let next = page.next_page();
        self.items.extend(page.items);

        if self.items.len() >= self.max_results {
            return Ok(PaginationState::Done);
        }

        let Some(next) = next else {
            return Ok(PaginationState::Done);
        };

        if next <= current || self.visited.contains(&next) {
            return Err(SearchError::Protocol(format!(
                "page {} links to page {} as next; pages must move forward",
                current, next
            )));
        }

        Ok(PaginationState::Fetching(next))
    }

    /// Walk pages until done and return at most `max_results` items
    pub async fn run(mut self) -> Result<Vec<RawItem>, SearchError> {
        while let PaginationState::Fetching(_) = self.state {
            self.step().await?;
        }

        self.items.truncate(self.max_results);
        Ok(self.items)
    }
}

/// Collect up to `max_results` items for `query` from one source
pub async fn search_source(
    source: &dyn CatalogSource,
    query: &str,
    max_results: usize,
) -> Result<Vec<RawItem>, SearchError> {
    Paginator::new(source, query, max_results)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{make_items, make_page, MockSource};
    use crate::sources::ErrorKind;

    fn titles(items: &[RawItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_single_page_returned_as_is() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("Book", 2), 1, None));

        let items = search_source(&mock, "test", 10).await.unwrap();

        assert_eq!(titles(&items), vec!["Book 1", "Book 2"]);
        assert_eq!(mock.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_follows_next_link() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("First", 2), 1, Some(2)));
        mock.set_page(2, make_page(make_items("Second", 1), 2, None));

        let items = search_source(&mock, "test", 3).await.unwrap();

        assert_eq!(titles(&items), vec!["First 1", "First 2", "Second 1"]);
        assert_eq!(mock.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_requests_use_max_page_size() {
        let mock = MockSource::new("lib").with_max_page_size(25);
        mock.set_page(1, make_page(make_items("Book", 1), 1, None));

        search_source(&mock, "robert henderson", 10).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].per_page, 25);
        assert_eq!(requests[0].query, "robert henderson");
    }

    #[tokio::test]
    async fn test_truncates_to_max_results() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("Book", 3), 1, Some(2)));

        let items = search_source(&mock, "test", 2).await.unwrap();

        assert_eq!(titles(&items), vec!["Book 1", "Book 2"]);
        // cap reached on page 1, so page 2 is never requested
        assert_eq!(mock.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_truncation_keeps_fetch_order_across_pages() {
        let mock = MockSource::new("lib").with_max_page_size(3);
        mock.set_page(1, make_page(make_items("A", 3), 1, Some(2)));
        mock.set_page(2, make_page(make_items("B", 3), 2, Some(3)));

        let items = search_source(&mock, "test", 5).await.unwrap();

        assert_eq!(titles(&items), vec!["A 1", "A 2", "A 3", "B 1", "B 2"]);
        assert_eq!(mock.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_exhausted_source_returns_fewer() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("A", 2), 1, Some(4)));
        mock.set_page(4, make_page(make_items("B", 1), 4, None));

        let items = search_source(&mock, "test", 50).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(mock.requested_pages(), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_zero_max_results_is_configuration_error() {
        let mock = MockSource::new("lib");

        let err = search_source(&mock, "test", 0).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(mock.requested_pages().is_empty());
    }

    #[tokio::test]
    async fn test_backward_next_is_protocol_error() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("A", 1), 1, Some(2)));
        mock.set_page(2, make_page(make_items("B", 1), 2, Some(1)));

        let err = search_source(&mock, "test", 10).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(mock.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_self_referencing_next_is_protocol_error() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("A", 1), 1, Some(1)));

        let mut paginator = Paginator::new(&mock, "test", 10).unwrap();
        let err = paginator.step().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(paginator.state(), PaginationState::Failed);
        assert_eq!(mock.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_page_with_next_is_followed() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(Vec::new(), 1, Some(2)));
        mock.set_page(2, make_page(make_items("B", 2), 2, None));

        let items = search_source(&mock, "q", 10).await.unwrap();

        assert_eq!(titles(&items), vec!["B 1", "B 2"]);
        assert_eq!(mock.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_mismatched_self_link_is_tolerated() {
        let mock = MockSource::new("lib");
        // page 1 claims to be page 7; ordering still follows the requested number
        mock.set_page(1, make_page(make_items("A", 1), 7, Some(2)));
        mock.set_page(2, make_page(make_items("B", 1), 2, None));

        let items = search_source(&mock, "q", 10).await.unwrap();

        assert_eq!(titles(&items), vec!["A 1", "B 1"]);
        assert_eq!(mock.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_error_aborts_without_partial_results() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("A", 2), 1, Some(2)));
        mock.set_failure(2, ErrorKind::Transport, "connection reset");

        let err = search_source(&mock, "test", 10).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_step_transitions() {
        let mock = MockSource::new("lib");
        mock.set_page(1, make_page(make_items("A", 1), 1, Some(3)));
        mock.set_page(3, make_page(make_items("B", 1), 3, None));

        let mut paginator = Paginator::new(&mock, "test", 10).unwrap();
        assert_eq!(paginator.state(), PaginationState::Fetching(1));
        assert_eq!(
            paginator.step().await.unwrap(),
            PaginationState::Fetching(3)
        );
        assert_eq!(paginator.step().await.unwrap(), PaginationState::Done);
        assert_eq!(paginator.items().len(), 2);

        // further steps are no-ops
        assert_eq!(paginator.step().await.unwrap(), PaginationState::Done);
        assert_eq!(mock.requested_pages(), vec![1, 3]);
    }
}
