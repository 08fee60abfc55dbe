//! Error types for the griddle crates.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, projection, and data-source failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for griddle operations.
///
/// Configuration and projection errors are fatal to the render that raised
/// them and are never retried; source errors surface failures of the
/// underlying data-access collaborator.
#[derive(Debug, Error)]
pub enum Error {
    /// The view's declared contract was violated before any record was
    /// processed.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A record failed to project into a row of the declared width.
    #[error("projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// The underlying data source failed while producing records.
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Contract violations detected before any record is processed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The view declared an empty header set.
    #[error("headers must not be empty")]
    EmptyHeaders,

    /// The view could not produce a usable repository handle.
    #[error("repository unavailable: {message}")]
    Repository { message: String },

    /// A search, filter, or ordering field is not part of the repository's
    /// schema.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// A search term was supplied but the view declares no search fields.
    #[error("search term supplied but the view declares no search fields")]
    SearchUnavailable,

    /// Pagination parameters are out of range.
    #[error("invalid page: {reason}")]
    InvalidPage { reason: String },
}

/// A record failed to project into a row of the declared width.
///
/// Carries the offending record's position within the rendered sequence so
/// the failure can be traced back to the source data.
#[derive(Debug)]
pub struct ProjectionError {
    /// Zero-based position of the record within the rendered sequence.
    pub index: u64,
    /// Expected row width (the header count).
    pub expected: usize,
    /// Actual row width produced by the projector.
    pub actual: usize,
}

impl ProjectionError {
    /// Create a new projection error.
    pub fn new(index: u64, expected: usize, actual: usize) -> Self {
        Self {
            index,
            expected,
            actual,
        }
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} produced {} cells, expected {}",
            self.index, self.actual, self.expected
        )
    }
}

impl std::error::Error for ProjectionError {}

/// Failures of the underlying data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An IO operation failed while reading source data.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Source data could not be decoded into records.
    #[error("decode error: {message}")]
    Decode { message: String },
}
