//! File-level run of the preprocessing pipeline.
//!
//! Stages, in order:
//! 1. **Ingest**: read the CSV and check its header
//! 2. **Type and filter**: apply the reference classification and filter
//! 3. **Output**: optionally write the filtered CSV and the JSON report

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use hrprep_ingest::load_table;
use hrprep_model::{
    ColumnData, ProcessingOptions, REFERENCE_SCHEMA, Table, reference_classification,
};
use hrprep_transform::{PipelineOutput, PipelineReport, reference_filter, run_pipeline, write_csv};

use crate::logging::redact_value;

/// Number of kept rows echoed at trace level.
const SAMPLE_ROWS: usize = 5;

/// What to run and where to write.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Prepend the source row positions to the written CSV.
    pub with_index: bool,
    pub report_json: Option<PathBuf>,
    pub options: ProcessingOptions,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    pub pipeline: PipelineOutput,
}

impl RunResult {
    pub fn report(&self) -> &PipelineReport {
        &self.pipeline.report
    }
}

/// Load, type, filter and write one file.
pub fn run(request: &RunRequest) -> Result<RunResult> {
    let run_span = info_span!("run", input = %request.input.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let raw = info_span!("ingest").in_scope(|| {
        load_table(&request.input, &REFERENCE_SCHEMA)
            .with_context(|| format!("load {}", request.input.display()))
    })?;

    let classification = reference_classification().context("build reference classification")?;
    let pipeline = run_pipeline(raw, &classification, &reference_filter(), &request.options)
        .context("type and filter table")?;
    log_unranked_labels(&pipeline.typed);
    log_sample_rows(&pipeline.filtered);

    info_span!("output").in_scope(|| -> Result<()> {
        if let Some(path) = &request.output {
            write_csv(&pipeline.filtered, &classification, path, request.with_index)
                .with_context(|| format!("write {}", path.display()))?;
        }
        if let Some(path) = &request.report_json {
            write_report_json(&pipeline.report, path)?;
        }
        Ok(())
    })?;

    info!(
        rows_in = pipeline.report.rows_in,
        rows_out = pipeline.report.rows_out,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunResult {
        input: request.input.clone(),
        output: request.output.clone(),
        report_json: request.report_json.clone(),
        pipeline,
    })
}

/// Write the report as pretty-printed JSON.
pub fn write_report_json(report: &PipelineReport, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}

fn log_unranked_labels(table: &Table) {
    for column in table.columns() {
        let ColumnData::Ordinal(ordinal) = &column.data else {
            continue;
        };
        if ordinal.unranked_labels().is_empty() {
            continue;
        }
        let labels = ordinal.unranked_labels().join(", ");
        debug!(
            column = %column.name,
            labels = %redact_value(&labels),
            "unranked labels"
        );
    }
}

fn log_sample_rows(table: &Table) {
    for row in 0..table.height().min(SAMPLE_ROWS) {
        let rendered = table
            .columns()
            .iter()
            .map(|column| column.data.display(row).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        trace!(
            source_row = table.row_index()[row],
            values = %redact_value(&rendered),
            "kept row"
        );
    }
}
