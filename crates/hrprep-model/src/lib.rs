//! Data model for the job-change preprocessing pipeline.
//!
//! - **table**: columnar [`Table`] with typed [`ColumnData`] and a source row index
//! - **scale**: [`OrdinalScale`] label orders and ranks
//! - **mapping**: [`BooleanMapping`] lookup tables for two-factor columns
//! - **rule** / **classification**: the column name to [`ColumnRule`] table
//! - **reference**: schema, scales and thresholds of the reference dataset
//! - **options**: [`ProcessingOptions`] for the typing stage

pub mod classification;
pub mod error;
pub mod mapping;
pub mod options;
pub mod reference;
pub mod rule;
pub mod scale;
pub mod table;

pub use classification::{Classification, ClassificationBuilder, ColumnSpec};
pub use error::{ModelError, Result};
pub use mapping::{BooleanMapping, MappingKey};
pub use options::{CategoryPolicy, ProcessingOptions};
pub use reference::{REFERENCE_SCHEMA, reference_classification};
pub use rule::{ColumnKind, ColumnRule};
pub use scale::{OrdinalScale, Rank};
pub use table::{Column, ColumnData, NominalColumn, OrdinalColumn, Table};

// Re-exported so downstream crates name the same 16-bit float type.
pub use half::f16;
