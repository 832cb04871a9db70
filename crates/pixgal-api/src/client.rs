use crate::{SearchError, SearchOptions, SearchQuery, SearchResult};
use reqwest::blocking::Client;

/// Anything that can answer a search query.
///
/// The gallery controller only talks to this trait, so tests can swap the
/// HTTP client for a canned one.
pub trait ImageSearch {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError>;
}

impl<T: ImageSearch + ?Sized> ImageSearch for &T {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        (**self).search(query)
    }
}

impl<T: ImageSearch + ?Sized> ImageSearch for std::sync::Arc<T> {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        (**self).search(query)
    }
}

/// Blocking Pixabay API client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct PixabayClient {
    api_base_url: String,
    api_key: String,
    options: SearchOptions,
    client: Client,
}

impl std::fmt::Debug for PixabayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixabayClient")
            .field("api_base_url", &self.api_base_url)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PixabayClient {
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(concat!("pixgal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            options,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/", self.api_base_url)
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

impl ImageSearch for PixabayClient {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let url = self.endpoint();
        log::debug!(
            "GET {} q={:?} page={} per_page={}",
            url,
            query.text(),
            query.page(),
            query.per_page()
        );

        let page = query.page().to_string();
        let per_page = query.per_page().to_string();
        let safesearch = self.options.safesearch.to_string();
        let params = [
            ("key", self.api_key.as_str()),
            ("q", query.text()),
            ("page", page.as_str()),
            ("per_page", per_page.as_str()),
            ("image_type", self.options.image_type.as_str()),
            ("orientation", self.options.orientation.as_str()),
            ("safesearch", safesearch.as_str()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .map_err(|e| SearchError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::warn!("Search failed ({}): {}", status, body.trim());
            return Err(SearchError::api(status, &body));
        }

        let body = response
            .text()
            .map_err(|e| SearchError::Network(e.without_url().to_string()))?;
        let result: SearchResult =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        log::debug!(
            "page {} returned {} of {} hits",
            query.page(),
            result.items.len(),
            result.total_hits
        );
        Ok(result)
    }
}
