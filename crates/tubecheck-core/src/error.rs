//! Error types for accessibility-check operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking video accessibility.
///
/// None of these are fatal to a run: the pipeline degrades to empty or
/// partial results instead of propagating them past its entry point.
#[derive(Debug, Error)]
pub enum Error {
    /// Redirect resolution could not produce a final URL.
    #[error("Redirect resolution failed for {url}: {message}")]
    Resolution {
        /// Entry URL that could not be resolved.
        url: String,
        /// Error message.
        message: String,
    },

    /// Playlist members could not be listed.
    #[error("Enumeration failed for {url}: {message}")]
    Enumeration {
        /// Resolved URL whose members could not be listed.
        url: String,
        /// Extractor error message.
        message: String,
    },

    /// Metadata extraction failed for a single video.
    #[error("Video not accessible: {url}: {message}")]
    VideoInaccessible {
        /// Video URL that failed extraction.
        url: String,
        /// Extractor error message.
        message: String,
    },

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
