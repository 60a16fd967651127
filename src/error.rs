use thiserror::Error;

/// Failures surfaced to whoever runs a search.
///
/// Structuring failures never appear here: the structurer absorbs them and
/// degrades to an unfiltered search.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("{backend} search failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SearchError {
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        SearchError::Backend {
            backend,
            message: message.into(),
        }
    }
}

/// Raised at startup, before any request is served
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
