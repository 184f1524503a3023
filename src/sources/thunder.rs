//! OverDrive Thunder catalog source.
//!
//! Searches one library's collection through
//! `GET {base}/v2/libraries/{id}/media?format=..&page=..&perPage=..&query=..`.

use async_trait::async_trait;
use url::Url;

use crate::config::SearchConfig;
use crate::models::{PageRequest, RawPage};
use crate::sources::{CatalogSource, SearchError};
use crate::utils::HttpClient;

const PAGE_PARAM: &str = "page";
const PAGE_SIZE_PARAM: &str = "perPage";

/// Thunder v2 search for a single library.
#[derive(Debug, Clone)]
pub struct ThunderSource {
    library_id: String,
    search_url: Url,
    /// Encoded format codes joined with literal commas
    format_param: String,
    max_page_size: usize,
    client: HttpClient,
}

impl ThunderSource {
    /// Create a source with its own HTTP client
    pub fn new(library_id: impl Into<String>, config: &SearchConfig) -> Result<Self, SearchError> {
        let client = HttpClient::from_config(config)?;
        Self::with_client(library_id, config, client)
    }

    /// Create a source that shares an existing HTTP client
    pub fn with_client(
        library_id: impl Into<String>,
        config: &SearchConfig,
        client: HttpClient,
    ) -> Result<Self, SearchError> {
        let library_id = library_id.into();
        if library_id.trim().is_empty() {
            return Err(SearchError::Configuration(
                "library id cannot be empty".to_string(),
            ));
        }

        let search_url = Url::parse(&config.library_search_url(&library_id)).map_err(|e| {
            SearchError::Configuration(format!("invalid search URL for '{}': {}", library_id, e))
        })?;

        let format_param = config.format_param();

        Ok(Self {
            library_id,
            search_url,
            format_param,
            max_page_size: config.max_page_size,
            client,
        })
    }

    /// Search endpoint for this library
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Build the request URL for one page
    fn build_url(&self, request: &PageRequest) -> Url {
        let mut url = self.search_url.clone();
        let raw_query = format!(
            "format={}&{}={}&{}={}&query={}",
            self.format_param,
            PAGE_PARAM,
            request.page,
            PAGE_SIZE_PARAM,
            request.per_page,
            urlencoding::encode(&request.query)
        );
        url.set_query(Some(&raw_query));
        url
    }

    fn check_request(&self, request: &PageRequest) -> Result<(), SearchError> {
        if request.per_page > self.max_page_size {
            return Err(SearchError::Configuration(format!(
                "request page size of {} exceeded max page size of {}",
                request.per_page, self.max_page_size
            )));
        }
        if request.per_page == 0 {
            return Err(SearchError::Configuration(
                "page size must be at least 1".to_string(),
            ));
        }
        if request.page == 0 {
            return Err(SearchError::Configuration(
                "page numbers start at 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for ThunderSource {
    fn id(&self) -> &str {
        &self.library_id
    }

    fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<RawPage, SearchError> {
        self.check_request(request)?;

        let url = self.build_url(request);
        tracing::debug!(
            library = %self.library_id,
            page = request.page,
            per_page = request.per_page,
            url = %url,
            "Fetching catalog page"
        );

        let response = self.client.client().get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Transport(format!(
                "catalog returned status: {}",
                status
            )));
        }

        let body = response.bytes().await?;
        let page: RawPage = serde_json::from_slice(&body)?;

        if page.items.len() > request.per_page {
            return Err(SearchError::Protocol(format!(
                "page {} returned {} items for a page size of {}",
                request.page,
                page.items.len(),
                request.per_page
            )));
        }

        tracing::debug!(
            library = %self.library_id,
            page = request.page,
            items = page.items.len(),
            next = ?page.next_page(),
            "Decoded catalog page"
        );

        Ok(page)
    }
}
