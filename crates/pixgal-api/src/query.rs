//! Search request construction

use crate::QueryError;
use serde::{Deserialize, Serialize};

/// Results requested per API call
pub const PER_PAGE: u32 = 40;

/// A validated request for one page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    page: u32,
    per_page: u32,
}

impl SearchQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Same query text, different page
    pub fn with_page(&self, page: u32) -> Result<Self, QueryError> {
        build_query(&self.text, page)
    }
}

/// Build a query from raw form input.
///
/// Leading and trailing whitespace is dropped; an empty remainder is rejected.
pub fn build_query(raw_text: &str, page: u32) -> Result<SearchQuery, QueryError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    if page == 0 {
        return Err(QueryError::InvalidPage(page));
    }

    Ok(SearchQuery {
        text: text.to_string(),
        page,
        per_page: PER_PAGE,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    All,
    #[default]
    Photo,
    Illustration,
    Vector,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::All => "all",
            ImageType::Photo => "photo",
            ImageType::Illustration => "illustration",
            ImageType::Vector => "vector",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    All,
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::All => "all",
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Filters sent along with every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub image_type: ImageType,
    pub orientation: Orientation,
    pub safesearch: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            image_type: ImageType::Photo,
            orientation: Orientation::Horizontal,
            safesearch: true,
        }
    }
}
