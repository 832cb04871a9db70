//! Client side of the Pixabay image search API.
//!
//! [`build_query`] validates raw input into a [`SearchQuery`]; an
//! [`ImageSearch`] implementation (normally [`PixabayClient`]) turns that into
//! one page of [`SearchResult`].

mod client;
mod error;
mod query;
mod types;

pub use client::{ImageSearch, PixabayClient};
pub use error::{QueryError, SearchError};
pub use query::{build_query, ImageType, Orientation, SearchOptions, SearchQuery, PER_PAGE};
pub use types::{ImageRecord, SearchResult};

/// Default API host
pub const DEFAULT_API_URL: &str = "https://pixabay.com";

/// API host, honouring the `PIXGAL_API_URL` override
pub fn get_api_base_url(configured: Option<&str>) -> String {
    if let Ok(url) = std::env::var("PIXGAL_API_URL") {
        return url;
    }

    configured.unwrap_or(DEFAULT_API_URL).to_string()
}
