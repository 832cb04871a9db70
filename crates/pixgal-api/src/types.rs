use serde::{Deserialize, Serialize};

/// One image as returned by the API, rendered as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "webformatURL")]
    pub preview_url: String,
    #[serde(rename = "largeImageURL")]
    pub full_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub downloads: u64,
}

/// One page of results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of hits reachable through pagination
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    /// Raw total reported by the API (may exceed `total_hits`)
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "hits", default)]
    pub items: Vec<ImageRecord>,
}
