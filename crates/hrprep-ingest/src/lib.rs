//! Data ingestion for the job-change dataset.
//!
//! Loads the source CSV into a Polars DataFrame with every column read as
//! String, converts it into a text [`Table`] and checks the header against
//! the expected schema.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hrprep_ingest::load_table;
//! use hrprep_model::REFERENCE_SCHEMA;
//!
//! let raw = load_table(Path::new("data/jobs.csv"), &REFERENCE_SCHEMA)?;
//! ```

mod csv;
mod error;
mod frame;
mod schema;

use std::path::Path;

use hrprep_model::Table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_frame,
    validate_dataframe_shape, validate_encoding,
};

// === Frame Conversion ===
pub use frame::{normalize_cell, normalize_header, table_from_frame};

// === Schema Checks ===
pub use schema::check_schema;

/// Read `path`, convert it to a text table and check its header.
///
/// # Errors
///
/// Fails on unreadable or malformed files and on any schema mismatch; no
/// partial table is returned.
pub fn load_table<S: AsRef<str>>(path: &Path, expected_schema: &[S]) -> Result<Table> {
    let df = read_csv_frame(path)?;
    let table = table_from_frame(&df)?;
    check_schema(&table, expected_schema)?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        estimated_bytes = table.estimated_size(),
        "source table loaded"
    );
    Ok(table)
}
