// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Search engine error: {0}")]
    Upstream(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Fixed, caller-safe message for an HTTP 500 body.
    pub fn public_message(&self) -> &'static str {
        match self {
            SearchError::Serialization(_) => "Error marshaling query to JSON",
            SearchError::Upstream(_) => "Elasticsearch search error",
            SearchError::Extraction(_) => "Error extracting search hits",
            SearchError::Config(_) | SearchError::Validation(_) | SearchError::Io(_) => {
                "Internal server error"
            }
        }
    }
}
