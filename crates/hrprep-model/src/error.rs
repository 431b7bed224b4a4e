//! Error types for the table and classification model.

use thiserror::Error;

/// Errors raised while building scales, classifications or tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    // === Ordinal Scale Errors ===
    /// An ordinal scale was defined without labels.
    #[error("ordinal scale must contain at least one label")]
    EmptyScale,

    /// The same label appears twice in an ordinal scale.
    #[error("duplicate label '{label}' in ordinal scale")]
    DuplicateLabel { label: String },

    /// More distinct labels than an ordinal code can address.
    #[error("more than {max} distinct ordinal labels")]
    TooManyLabels { max: u32 },

    // === Classification Errors ===
    /// A column was assigned to more than one class.
    #[error("column '{column}' is assigned to more than one class")]
    DuplicateClassification { column: String },

    /// A rule names a column that is not part of the schema.
    #[error("column '{column}' is not part of the schema")]
    UnknownColumn { column: String },

    // === Table Errors ===
    /// Two columns share the same name.
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// A column does not have as many cells as the table has rows.
    #[error("column '{column}' has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row mask does not match the table height.
    #[error("row mask has {found} entries, table has {expected} rows")]
    MaskLengthMismatch { expected: usize, found: usize },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
