//! Error types for column typing, filtering and export.

use std::path::PathBuf;

use thiserror::Error;

use hrprep_model::{ColumnKind, ModelError};

/// Errors raised by the transformation stages.
///
/// Row numbers are source rows (0-based, header excluded), taken from the
/// table's row index.
#[derive(Debug, Error)]
pub enum TransformError {
    // === Typing Errors ===
    /// A table column has no entry in the classification.
    #[error("column '{column}' is not covered by the classification")]
    UnclassifiedColumn { column: String },

    /// A two-factor cell is not listed in the column's lookup table.
    #[error("unmapped boolean value '{value}' in column '{column}' (row {row})")]
    UnmappedBooleanValue {
        column: String,
        value: String,
        row: usize,
    },

    /// A numeric cell could not be parsed.
    #[error("invalid number '{value}' in column '{column}' (row {row})")]
    InvalidNumber {
        column: String,
        value: String,
        row: usize,
    },

    /// An integer column holds a fractional value.
    #[error("non-integral value '{value}' in integer column '{column}' (row {row})")]
    NonIntegralValue {
        column: String,
        value: String,
        row: usize,
    },

    /// An integer does not fit in 32 bits.
    #[error("value '{value}' in column '{column}' overflows int32 (row {row})")]
    IntegerOverflow {
        column: String,
        value: String,
        row: usize,
    },

    /// An ordinal label is not on the scale (strict policy only).
    #[error("label '{label}' is not on the ordinal scale of column '{column}' (row {row})")]
    UnknownOrdinalLabel {
        column: String,
        label: String,
        row: usize,
    },

    /// A typed column cannot be converted by its rule.
    #[error("column '{column}' is {found} and cannot be re-typed as {expected}")]
    IncompatibleColumn {
        column: String,
        found: ColumnKind,
        expected: ColumnKind,
    },

    // === Filter Errors ===
    /// Column referenced by a threshold is absent.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Threshold column is not ordinal.
    #[error("column '{column}' is {kind}, ordinal comparison requires an ordinal column")]
    NotOrdinal { column: String, kind: ColumnKind },

    /// Threshold label is not on the column's scale.
    #[error("threshold label '{label}' is not on the ordinal scale of column '{column}'")]
    UnknownThresholdLabel { column: String, label: String },

    // === Export Errors ===
    /// Output file could not be created.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
