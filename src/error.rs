//! Error types for catalog loading and recommendation.
//!
//! The library reports typed errors so callers can tell a fatal catalog
//! problem apart from a recoverable request problem. The binary wraps these
//! in `anyhow` for display.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog file missing, unreadable or malformed. Fatal to the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog file {} lacks required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid number `{value}` in column `{column}` on line {line}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// An enumerated questionnaire answer outside its allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} `{value}`; expected one of: {}", .allowed.join(", "))]
pub struct InvalidPreference {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Recoverable failures of a single recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("No songs found in genre `{genre}`")]
    NoMatch { genre: String },

    #[error(transparent)]
    InvalidPreference(#[from] InvalidPreference),
}
