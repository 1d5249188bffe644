//! Error types for eve-rowset
//!
//! Every public API returns `Result<T, Error>`. Decoding is all-or-nothing:
//! any error below is fatal to the decode call that produced it.

use crate::record::AttrError;
use thiserror::Error;

/// The main error type for eve-rowset
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Target / Schema Errors
    // ============================================================================
    #[error("Invalid decode target: {message}")]
    InvalidTarget { message: String },

    #[error("Schema error: {message}")]
    Schema { message: String },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Failed to parse row {index} of row set '{rowset}': {source}")]
    RowParse {
        rowset: String,
        index: usize,
        #[source]
        source: AttrError,
    },

    #[error("Expected end of row set '{rowset}', got EOF instead")]
    UnexpectedEof { rowset: String },

    #[error("Invalid expiry time '{value}': {message}")]
    TimeParse { value: String, message: String },

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration / I/O Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error for an open row set
    pub fn unexpected_eof(rowset: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            rowset: rowset.into(),
        }
    }

    /// Create a time parse error
    pub fn time_parse(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TimeParse {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if the failed call is worth repeating.
    ///
    /// Only transport failures qualify; decode errors are deterministic for a
    /// given document.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| is_retryable_status(s.as_u16()))
            }
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for eve-rowset
pub type Result<T> = std::result::Result<T, Error>;
