//! Typing and filtering stages run in sequence.
//!
//! 1. **Classify**: re-type every column by its rule
//! 2. **Filter**: keep rows meeting every ordinal threshold
//!
//! Each stage runs inside its own span and reports its duration.

use std::time::Instant;

use tracing::{info, info_span};

use hrprep_model::{Classification, ProcessingOptions, Table};

use crate::dispatch::apply_classification;
use crate::error::Result;
use crate::filter::RowFilter;
use crate::report::{PipelineReport, StageTimings};

/// Tables produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Table as loaded, every column text.
    pub raw: Table,
    /// Every column in its target representation.
    pub typed: Table,
    /// Typed rows that satisfy the filter.
    pub filtered: Table,
    pub report: PipelineReport,
}

/// Type `raw` by `classification`, then filter it.
///
/// # Errors
///
/// Returns the first typing or filtering error. Nothing is returned for a
/// failed run.
pub fn run_pipeline(
    raw: Table,
    classification: &Classification,
    filter: &RowFilter,
    options: &ProcessingOptions,
) -> Result<PipelineOutput> {
    let mut timings = StageTimings::default();

    let typed = info_span!("classify_stage").in_scope(|| -> Result<Table> {
        let start = Instant::now();
        let typed = apply_classification(&raw, classification, options)?;
        timings.classify_ms = start.elapsed().as_millis();
        info!(
            rows = typed.height(),
            bytes_before = raw.estimated_size(),
            bytes_after = typed.estimated_size(),
            duration_ms = timings.classify_ms,
            "classify complete"
        );
        Ok(typed)
    })?;

    let filtered = info_span!("filter_stage").in_scope(|| -> Result<Table> {
        let start = Instant::now();
        let filtered = filter.apply(&typed)?;
        timings.filter_ms = start.elapsed().as_millis();
        info!(
            rows_in = typed.height(),
            rows_out = filtered.height(),
            thresholds = filter.thresholds().len(),
            duration_ms = timings.filter_ms,
            "filter complete"
        );
        Ok(filtered)
    })?;

    let report = PipelineReport::build(
        &raw,
        &typed,
        &filtered,
        options.category_policy,
        filter.thresholds(),
        timings,
    );

    Ok(PipelineOutput {
        raw,
        typed,
        filtered,
        report,
    })
}
