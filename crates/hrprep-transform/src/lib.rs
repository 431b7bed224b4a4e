//! Column typing, ordinal filtering and export for job-change tables.
//!
//! - **dispatch**: [`apply_classification`] re-types columns by rule
//! - **filter**: [`RowFilter`] keeps rows meeting ordinal thresholds
//! - **pipeline**: [`run_pipeline`] sequences both and builds a [`PipelineReport`]
//! - **export**: [`write_csv`] and [`table_to_frame`] hand tables back to Polars

pub mod dispatch;
pub mod error;
pub mod export;
pub mod filter;
pub mod numeric;
pub mod pipeline;
pub mod report;

pub use dispatch::{apply_classification, convert_column};
pub use error::{Result, TransformError};
pub use export::{ROW_INDEX_COLUMN, table_to_frame, write_csv};
pub use filter::{OrdinalThreshold, RowFilter, reference_filter};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use report::{ColumnReport, PipelineReport, StageTimings};
