// File: crates/simplechart-core/src/error.rs
// Summary: Error type for option validation, data shaping and container lookup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart container not found. Did you misspell '{id}'? Make sure to run this method when the DOM is loaded.")]
    MissingContainer { id: String },

    #[error("series {series}: value {raw:?} at key '{key}' is not a finite number")]
    MalformedValue { series: usize, key: String, raw: String },

    #[error("series {series}: key '{key}' does not match date format '{format}'")]
    MalformedDate { series: usize, key: String, format: String },

    #[error("no data: the first series has no entries")]
    EmptySeries,

    #[error("invalid date format '{format}'")]
    InvalidDateFormat { format: String },

    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("failed to parse chart configuration")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
