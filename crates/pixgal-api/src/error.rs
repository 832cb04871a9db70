use reqwest::StatusCode;

/// Rejected input, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Please enter a search query.")]
    EmptyQuery,

    #[error("Page numbers start at 1 (got {0})")]
    InvalidPage(u32),
}

/// Failure of a single search request.
///
/// `Display` yields the message meant for the user: transport and API
/// messages are passed through unmodified.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse search response: {0}")]
    Decode(String),
}

impl SearchError {
    pub(crate) fn api(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            body.to_string()
        };
        SearchError::Api { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_forwards_body_verbatim() {
        let err = SearchError::api(
            StatusCode::BAD_REQUEST,
            "[ERROR 400] \"page\" is out of valid range.\n",
        );
        assert_eq!(err.to_string(), "[ERROR 400] \"page\" is out of valid range.");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn api_error_without_body_uses_status() {
        let err = SearchError::api(StatusCode::TOO_MANY_REQUESTS, "  ");
        assert_eq!(
            err.to_string(),
            "Request failed with status 429 Too Many Requests"
        );
    }

    #[test]
    fn query_error_message_is_user_facing() {
        let err: SearchError = QueryError::EmptyQuery.into();
        assert_eq!(err.to_string(), "Please enter a search query.");
        assert!(err.status().is_none());
    }
}
