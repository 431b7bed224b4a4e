//! Serializable summary of a pipeline run.

use serde::Serialize;

use hrprep_model::{CategoryPolicy, ColumnData, ColumnKind, Table};

use crate::filter::OrdinalThreshold;

/// Per-column summary of the typed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub kind: ColumnKind,
    pub nulls: usize,
    /// Cells whose ordinal label is not on the scale.
    pub unranked: usize,
    /// Distinct labels for ordinal and nominal columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<usize>,
    pub bytes_before: usize,
    pub bytes_after: usize,
}

impl ColumnReport {
    fn from_columns(name: &str, raw: Option<&ColumnData>, typed: &ColumnData) -> Self {
        let (unranked, categories) = match typed {
            ColumnData::Ordinal(column) => (
                column.unranked_count(),
                Some(column.scale().len() + column.unranked_labels().len()),
            ),
            ColumnData::Nominal(column) => (0, Some(column.categories().len())),
            _ => (0, None),
        };
        Self {
            name: name.to_string(),
            kind: typed.kind(),
            nulls: typed.null_count(),
            unranked,
            categories,
            bytes_before: raw.map_or(0, ColumnData::estimated_size),
            bytes_after: typed.estimated_size(),
        }
    }
}

/// Stage durations in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    pub classify_ms: u128,
    pub filter_ms: u128,
}

/// Outcome of typing and filtering one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub rows_in: usize,
    pub rows_typed: usize,
    pub rows_out: usize,
    pub bytes_before: usize,
    pub bytes_after: usize,
    pub category_policy: CategoryPolicy,
    pub thresholds: Vec<OrdinalThreshold>,
    pub columns: Vec<ColumnReport>,
    pub timings: StageTimings,
}

impl PipelineReport {
    pub(crate) fn build(
        raw: &Table,
        typed: &Table,
        filtered: &Table,
        category_policy: CategoryPolicy,
        thresholds: &[OrdinalThreshold],
        timings: StageTimings,
    ) -> Self {
        let columns = typed
            .columns()
            .iter()
            .map(|column| {
                let before = raw.column(&column.name).map(|source| &source.data);
                ColumnReport::from_columns(&column.name, before, &column.data)
            })
            .collect();
        Self {
            rows_in: raw.height(),
            rows_typed: typed.height(),
            rows_out: filtered.height(),
            bytes_before: raw.estimated_size(),
            bytes_after: typed.estimated_size(),
            category_policy,
            thresholds: thresholds.to_vec(),
            columns,
            timings,
        }
    }

    /// Total unranked ordinal cells across all columns.
    pub fn unranked_total(&self) -> usize {
        self.columns.iter().map(|column| column.unranked).sum()
    }

    /// Share of rows kept by the filter, 0 when the input is empty.
    pub fn retention(&self) -> f64 {
        if self.rows_typed == 0 {
            0.0
        } else {
            self.rows_out as f64 / self.rows_typed as f64
        }
    }
}
