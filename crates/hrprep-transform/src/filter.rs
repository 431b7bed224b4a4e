//! Ordinal threshold filtering.
//!
//! A [`RowFilter`] keeps the rows whose ordinal cells reach a minimum label
//! in every configured column. Comparisons use scale ranks, never label
//! text, so `"9"` ranks below `"10"` on the experience scale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use hrprep_model::reference::{COMPANY_SIZE, COMPANY_SIZE_THRESHOLD, EXPERIENCE, EXPERIENCE_THRESHOLD};
use hrprep_model::{ColumnData, Table};

use crate::error::{Result, TransformError};

/// Minimum ordinal label a column must reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalThreshold {
    pub column: String,
    pub min_label: String,
}

impl OrdinalThreshold {
    pub fn new(column: impl Into<String>, min_label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            min_label: min_label.into(),
        }
    }

    /// One entry per row: `true` when the cell's rank is at least the
    /// threshold rank. Missing and unranked cells are `false`.
    ///
    /// # Errors
    ///
    /// Fails when the column is absent or not ordinal, or when the threshold
    /// label is not on the column's scale.
    pub fn mask(&self, table: &Table) -> Result<Vec<bool>> {
        let column = table
            .column(&self.column)
            .ok_or_else(|| TransformError::ColumnNotFound {
                column: self.column.clone(),
            })?;
        let ColumnData::Ordinal(ordinal) = &column.data else {
            return Err(TransformError::NotOrdinal {
                column: self.column.clone(),
                kind: column.kind(),
            });
        };
        let min_rank = ordinal.scale().rank(&self.min_label).ok_or_else(|| {
            TransformError::UnknownThresholdLabel {
                column: self.column.clone(),
                label: self.min_label.clone(),
            }
        })?;

        Ok((0..ordinal.len())
            .map(|row| ordinal.rank(row).is_some_and(|rank| rank >= min_rank))
            .collect())
    }
}

/// Conjunction of ordinal thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    thresholds: Vec<OrdinalThreshold>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, column: impl Into<String>, min_label: impl Into<String>) -> Self {
        self.thresholds.push(OrdinalThreshold::new(column, min_label));
        self
    }

    pub fn thresholds(&self) -> &[OrdinalThreshold] {
        &self.thresholds
    }

    /// Logical AND of every threshold mask. An empty filter keeps all rows.
    pub fn mask(&self, table: &Table) -> Result<Vec<bool>> {
        let mut mask = vec![true; table.height()];
        for threshold in &self.thresholds {
            let column_mask = threshold.mask(table)?;
            let kept = column_mask.iter().filter(|keep| **keep).count();
            debug!(
                column = %threshold.column,
                min_label = %threshold.min_label,
                kept,
                "threshold evaluated"
            );
            for (keep, pass) in mask.iter_mut().zip(column_mask) {
                *keep &= pass;
            }
        }
        Ok(mask)
    }

    /// Keep matching rows in their original order.
    ///
    /// Cell values are untouched and the row index still points at the
    /// source rows.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        let mask = self.mask(table)?;
        Ok(table.filter(&mask)?)
    }
}

/// Rows with at least ten years of experience at companies of 1000 or more
/// employees.
pub fn reference_filter() -> RowFilter {
    RowFilter::new()
        .with_threshold(EXPERIENCE, EXPERIENCE_THRESHOLD)
        .with_threshold(COMPANY_SIZE, COMPANY_SIZE_THRESHOLD)
}
