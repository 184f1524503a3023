//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::DEFAULT_MAX_PAGE_SIZE;
use crate::models::{PageInfo, PageLinks, PageRequest, RawItem, RawPage};
use crate::sources::{CatalogSource, ErrorKind, SearchError};

#[derive(Debug, Clone)]
enum Scripted {
    Page(RawPage),
    Fail(ErrorKind, String),
}

/// A source that serves predefined pages and records every request it sees.
///
/// Pages that were never scripted come back empty with no `next` link.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    max_page_size: usize,
    pages: Mutex<HashMap<u32, Scripted>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl MockSource {
    /// Create a new mock source for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            pages: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set the largest page size the mock accepts.
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Serve `page` when page number `number` is requested.
    pub fn set_page(&self, number: u32, page: RawPage) {
        let mut guard = self.pages.lock().unwrap();
        guard.insert(number, Scripted::Page(page));
    }

    /// Fail with an error of `kind` when page number `number` is requested.
    pub fn set_failure(&self, number: u32, kind: ErrorKind, message: impl Into<String>) {
        let mut guard = self.pages.lock().unwrap();
        guard.insert(number, Scripted::Fail(kind, message.into()));
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Page numbers requested so far, in order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().map(|r| r.page).collect()
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<RawPage, SearchError> {
        if request.per_page > self.max_page_size {
            return Err(SearchError::Configuration(format!(
                "request page size of {} exceeded max page size of {}",
                request.per_page, self.max_page_size
            )));
        }

        self.requests.lock().unwrap().push(request.clone());

        let scripted = self.pages.lock().unwrap().get(&request.page).cloned();
        match scripted {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Fail(kind, message)) => Err(match kind {
                ErrorKind::Configuration => SearchError::Configuration(message),
                ErrorKind::Transport => SearchError::Transport(message),
                ErrorKind::Decode => SearchError::Decode(message),
                ErrorKind::Protocol => SearchError::Protocol(message),
            }),
            None => Ok(make_page(Vec::new(), request.page, None)),
        }
    }
}

/// Helper function to create a catalog item for testing.
pub fn make_item(title: &str, owned_copies: u32, available_copies: u32) -> RawItem {
    RawItem {
        title: title.to_string(),
        sort_title: title.to_string(),
        author: format!("Author of {}", title),
        is_owned: owned_copies > 0,
        owned_copies,
        available_copies,
        ..Default::default()
    }
}

/// Helper function to create `count` items titled `{prefix} 1..=count`.
pub fn make_items(prefix: &str, count: usize) -> Vec<RawItem> {
    (1..=count)
        .map(|i| make_item(&format!("{} {}", prefix, i), 1, 1))
        .collect()
}

/// Helper function to create a page with optional `next` link.
pub fn make_page(items: Vec<RawItem>, page: u32, next: Option<u32>) -> RawPage {
    RawPage {
        items,
        links: PageLinks {
            current: Some(PageInfo { page }),
            next: next.map(|page| PageInfo { page }),
        },
    }
}
