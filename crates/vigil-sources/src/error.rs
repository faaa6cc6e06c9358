//! Source client error types.

use thiserror::Error;

/// Errors that can occur when talking to an external data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the source.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The case-count CSV could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The source returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The operation needs an endpoint that is not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl From<serde_json::Error> for SourceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
