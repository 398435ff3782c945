//! Triage-specific error handling.

use thiserror::Error;

/// Errors raised by the triage pipeline and the review backend.
#[derive(Error, Debug)]
pub enum TriageError {
    /// An exclusion fragment failed to compile. Surfaces at startup,
    /// never at request time.
    #[error("Invalid exclusion pattern: {0}")]
    InvalidExclusionPattern(String),

    /// API key not found in environment variables or settings.
    #[error(
        "Review API key not found. Set REVIEW_TRIAGE_API_KEY or OPENAI_API_KEY environment variable"
    )]
    ApiKeyNotFound,

    /// Review API request failed with error message.
    #[error("Review API request failed: {0}")]
    ApiRequestFailed(String),

    /// Invalid response format from the review API.
    #[error("Invalid response format from review API: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

// Note: anyhow already has a blanket impl for thiserror::Error types
