//! Error types for stockwise operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fitting or projecting demand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The series has no observations to fit.
    #[error("historical series is empty")]
    EmptyHistory,

    /// Observation dates must be strictly increasing.
    #[error("observation {index} is not after the previous one")]
    NonIncreasingDates { index: usize },

    /// The horizon is zero or longer than `MAX_FORECAST_DAYS`.
    #[error("forecast horizon must be between 1 and {} days", crate::config::MAX_FORECAST_DAYS)]
    InvalidHorizon,

    /// No catalog item carries the requested SKU.
    #[error("SKU {0} not found")]
    UnknownItem(String),
}

/// Errors raised while loading configuration, items or policies from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON in {path} at line {line}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("path does not exist: {0}")]
    Missing(PathBuf),
}
