use reqwest::StatusCode;
use thiserror::Error;

/// Error types for diary operations
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("food search request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("food search returned HTTP {status}")]
    FetchStatus { status: StatusCode },

    #[error("invalid serving size: {input:?}")]
    InvalidServingSize { input: String },

    #[error("index {index} is out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no food selected")]
    NoSelection,

    #[error("a search is already in progress")]
    SearchInFlight,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("failed to encode food log: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for diary operations
pub type DiaryResult<T> = Result<T, DiaryError>;
