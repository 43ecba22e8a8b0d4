//! Error types for the fallible edges of the engine
//!
//! The calculation engine itself is infallible. Only rate table loading and
//! raw input parsing can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating rate tables
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("failed to open rate table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: cannot parse `{value}` as a number in column {column}")]
    Parse {
        file: &'static str,
        column: usize,
        value: String,
    },

    #[error("stamp duty brackets must start at threshold 0")]
    MissingZeroBracket,

    #[error("{table} must be sorted ascending (offending entry {index})")]
    Unsorted { table: &'static str, index: usize },

    #[error("LMI row {row} has {found} rates, expected one per loan tier ({expected})")]
    RaggedLmiRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{table} is empty")]
    Empty { table: &'static str },

    #[error("fee schedule is missing `{0}`")]
    MissingFee(&'static str),
}

/// Errors raised while reading raw caller input
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown input field `{0}`")]
    UnknownField(String),

    #[error("`{0}` is not a finite number")]
    InvalidNumber(String),
}
