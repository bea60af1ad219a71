//! Error types for scenefinder

use std::io;
use thiserror::Error;

/// Result type for scenefinder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in scenefinder operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed configuration file
    #[error("Config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Start date after end date, or unparsable date
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// The catalog returned no matching items
    #[error("No scenes matched the query")]
    EmptyResultSet,

    /// Transport level failure talking to the catalog
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("Catalog error {status}: {message}")]
    Catalog { status: u16, message: String },

    /// Catalog response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No session with this id
    #[error("Unknown session: {0}")]
    UnknownSession(String),
}

impl Error {
    /// True for every failure of the catalog query itself, which is reported
    /// to the user as a single "search failed" condition
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Catalog { .. } | Error::Json(_))
    }
}
