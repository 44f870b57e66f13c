use thiserror::Error;

/// Failure while loading the startup reference lists. Terminal for the
/// session: callers must not offer search over partial reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to load {resource}: backend answered {status}")]
    Fetch {
        resource: &'static str,
        status: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("school name must not be empty")]
    EmptySchoolName,

    #[error("recommendation request failed: {0}")]
    RecommendationFailed(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
