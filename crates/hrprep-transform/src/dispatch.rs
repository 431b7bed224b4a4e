//! Column type dispatcher.
//!
//! Every column is re-typed by the single rule its classification assigns.
//! The rule set is data; this module only interprets it. Text columns are
//! converted, columns already in their target representation pass through
//! unchanged, so running the dispatcher twice yields the same table.

use tracing::{debug, info_span, warn};

use hrprep_model::{
    BooleanMapping, CategoryPolicy, Classification, Column, ColumnData, ColumnRule,
    NominalColumn, OrdinalColumn, OrdinalScale, ProcessingOptions, Table,
};

use crate::error::{Result, TransformError};
use crate::numeric::{IntegerIssue, parse_f16, parse_i32};

/// Re-type every column of `table` according to `classification`.
///
/// The input table is not modified; the result keeps its row index.
///
/// # Errors
///
/// Fails on the first column that is not classified or cannot be
/// converted. No partially typed table is returned.
pub fn apply_classification(
    table: &Table,
    classification: &Classification,
    options: &ProcessingOptions,
) -> Result<Table> {
    let span = info_span!(
        "classify",
        rows = table.height(),
        columns = table.width()
    );
    let _guard = span.enter();

    let mut columns = Vec::with_capacity(table.width());
    for column in table.columns() {
        let rule = classification.rule_for(&column.name).ok_or_else(|| {
            TransformError::UnclassifiedColumn {
                column: column.name.clone(),
            }
        })?;
        let data = convert_column(column, rule, table.row_index(), options)?;
        debug!(
            column = %column.name,
            kind = %data.kind(),
            nulls = data.null_count(),
            "column typed"
        );
        columns.push(Column::new(column.name.clone(), data));
    }

    Ok(Table::with_row_index(columns, table.row_index().to_vec())?)
}

/// Convert one column by its rule.
///
/// `row_index` maps positions to source rows for error reporting.
pub fn convert_column(
    column: &Column,
    rule: &ColumnRule,
    row_index: &[usize],
    options: &ProcessingOptions,
) -> Result<ColumnData> {
    let name = column.name.as_str();
    match (&column.data, rule) {
        (ColumnData::Text(values), rule) => convert_text(name, values, rule, row_index, options),
        (ColumnData::Boolean(_), ColumnRule::Boolean(_))
        | (ColumnData::Int32(_), ColumnRule::Int32)
        | (ColumnData::Float16(_), ColumnRule::Float16)
        | (ColumnData::Nominal(_), ColumnRule::Nominal) => Ok(column.data.clone()),
        (ColumnData::Ordinal(existing), ColumnRule::Ordinal(scale)) => {
            if existing.scale() == scale {
                Ok(column.data.clone())
            } else {
                let labels = (0..existing.len()).map(|row| existing.label(row));
                encode_ordinal(name, labels, scale, row_index, options)
            }
        }
        (data, rule) => Err(TransformError::IncompatibleColumn {
            column: name.to_string(),
            found: data.kind(),
            expected: rule.kind(),
        }),
    }
}

fn convert_text(
    name: &str,
    values: &[Option<String>],
    rule: &ColumnRule,
    row_index: &[usize],
    options: &ProcessingOptions,
) -> Result<ColumnData> {
    let cells = values
        .iter()
        .map(|value| value.as_deref().map(str::trim).filter(|v| !v.is_empty()));

    match rule {
        ColumnRule::Boolean(mapping) => convert_boolean(name, cells, mapping, row_index),
        ColumnRule::Int32 => convert_int32(name, cells, row_index),
        ColumnRule::Float16 => convert_float16(name, cells, row_index),
        ColumnRule::Ordinal(scale) => encode_ordinal(name, cells, scale, row_index, options),
        ColumnRule::Nominal => Ok(ColumnData::Nominal(NominalColumn::from_labels(cells))),
    }
}

fn source_row(row_index: &[usize], position: usize) -> usize {
    row_index.get(position).copied().unwrap_or(position)
}

fn convert_boolean<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a str>>,
    mapping: &BooleanMapping,
    row_index: &[usize],
) -> Result<ColumnData> {
    let mut out = Vec::new();
    for (position, cell) in cells.enumerate() {
        let Some(value) = cell else {
            out.push(None);
            continue;
        };
        let mapped =
            mapping
                .lookup(value)
                .ok_or_else(|| TransformError::UnmappedBooleanValue {
                    column: name.to_string(),
                    value: value.to_string(),
                    row: source_row(row_index, position),
                })?;
        out.push(Some(mapped));
    }
    Ok(ColumnData::Boolean(out))
}

fn convert_int32<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a str>>,
    row_index: &[usize],
) -> Result<ColumnData> {
    let mut out = Vec::new();
    for (position, cell) in cells.enumerate() {
        let Some(value) = cell else {
            out.push(None);
            continue;
        };
        let parsed = parse_i32(value).map_err(|issue| {
            let column = name.to_string();
            let value = value.to_string();
            let row = source_row(row_index, position);
            match issue {
                IntegerIssue::Invalid => TransformError::InvalidNumber { column, value, row },
                IntegerIssue::NonIntegral => {
                    TransformError::NonIntegralValue { column, value, row }
                }
                IntegerIssue::Overflow => TransformError::IntegerOverflow { column, value, row },
            }
        })?;
        out.push(Some(parsed));
    }
    Ok(ColumnData::Int32(out))
}

fn convert_float16<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a str>>,
    row_index: &[usize],
) -> Result<ColumnData> {
    let mut out = Vec::new();
    let mut saturated = 0usize;
    for (position, cell) in cells.enumerate() {
        let Some(value) = cell else {
            out.push(None);
            continue;
        };
        let parsed = parse_f16(value).ok_or_else(|| TransformError::InvalidNumber {
            column: name.to_string(),
            value: value.to_string(),
            row: source_row(row_index, position),
        })?;
        if parsed.is_infinite() && value.parse::<f64>().is_ok_and(f64::is_finite) {
            saturated += 1;
        }
        out.push(Some(parsed));
    }
    if saturated > 0 {
        warn!(
            column = %name,
            count = saturated,
            "values exceed the float16 range and were stored as infinity"
        );
    }
    Ok(ColumnData::Float16(out))
}

fn encode_ordinal<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a str>>,
    scale: &OrdinalScale,
    row_index: &[usize],
    options: &ProcessingOptions,
) -> Result<ColumnData> {
    let mut column = OrdinalColumn::new(scale.clone());
    for (position, cell) in cells.enumerate() {
        if let Some(label) = cell
            && options.category_policy == CategoryPolicy::Strict
            && !scale.contains(label)
        {
            return Err(TransformError::UnknownOrdinalLabel {
                column: name.to_string(),
                label: label.to_string(),
                row: source_row(row_index, position),
            });
        }
        column.push(cell)?;
    }

    let unranked = column.unranked_count();
    if unranked > 0 && options.warn_on_unranked {
        warn!(
            column = %name,
            count = unranked,
            distinct = column.unranked_labels().len(),
            "labels outside the ordinal scale kept without rank"
        );
    }
    Ok(ColumnData::Ordinal(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrprep_model::ColumnKind;

    fn text(name: &str, values: &[Option<&str>]) -> Column {
        Column::text(name, values.iter().copied())
    }

    fn options() -> ProcessingOptions {
        ProcessingOptions::default()
    }

    #[test]
    fn test_boolean_conversion() {
        let mapping = BooleanMapping::new().number(0.0, false).number(1.0, true);
        let column = text("job_change", &[Some("0.0"), Some("1.0"), None]);
        let data =
            convert_column(&column, &ColumnRule::Boolean(mapping), &[0, 1, 2], &options()).unwrap();
        assert_eq!(data, ColumnData::Boolean(vec![Some(false), Some(true), None]));
    }

    #[test]
    fn test_unmapped_boolean_reports_source_row() {
        let mapping = BooleanMapping::new().number(0.0, false).number(1.0, true);
        let column = text("job_change", &[Some("1.0"), Some("2.0")]);
        let err = convert_column(&column, &ColumnRule::Boolean(mapping), &[10, 42], &options())
            .unwrap_err();
        match err {
            TransformError::UnmappedBooleanValue { column, value, row } => {
                assert_eq!(column, "job_change");
                assert_eq!(value, "2.0");
                assert_eq!(row, 42);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_int32_errors() {
        let column = text("training_hours", &[Some("12.5")]);
        let err = convert_column(&column, &ColumnRule::Int32, &[0], &options()).unwrap_err();
        assert!(matches!(err, TransformError::NonIntegralValue { .. }));

        let column = text("training_hours", &[Some("9999999999")]);
        let err = convert_column(&column, &ColumnRule::Int32, &[0], &options()).unwrap_err();
        assert!(matches!(err, TransformError::IntegerOverflow { .. }));
    }

    #[test]
    fn test_blank_text_is_missing() {
        let column = text("training_hours", &[Some("  "), Some("7")]);
        let data = convert_column(&column, &ColumnRule::Int32, &[0, 1], &options()).unwrap();
        assert_eq!(data, ColumnData::Int32(vec![None, Some(7)]));
    }

    #[test]
    fn test_strict_policy_rejects_unknown_label() {
        let scale = OrdinalScale::new(["never", "1", ">4"]).unwrap();
        let column = text("last_new_job", &[Some("1"), Some("sometimes")]);
        let err = convert_column(
            &column,
            &ColumnRule::Ordinal(scale.clone()),
            &[0, 1],
            &ProcessingOptions::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::UnknownOrdinalLabel { row: 1, .. }));

        let data =
            convert_column(&column, &ColumnRule::Ordinal(scale), &[0, 1], &options()).unwrap();
        let ColumnData::Ordinal(ordinal) = data else {
            panic!("expected ordinal column");
        };
        assert_eq!(ordinal.rank(0), Some(1));
        assert_eq!(ordinal.rank(1), None);
        assert_eq!(ordinal.label(1), Some("sometimes"));
    }

    #[test]
    fn test_typed_column_passes_through() {
        let column = Column::new("training_hours", ColumnData::Int32(vec![Some(3)]));
        let data = convert_column(&column, &ColumnRule::Int32, &[0], &options()).unwrap();
        assert_eq!(data, column.data);
    }

    #[test]
    fn test_incompatible_typed_column() {
        let column = Column::new("flag", ColumnData::Boolean(vec![Some(true)]));
        let err = convert_column(&column, &ColumnRule::Int32, &[0], &options()).unwrap_err();
        match err {
            TransformError::IncompatibleColumn {
                found, expected, ..
            } => {
                assert_eq!(found, ColumnKind::Boolean);
                assert_eq!(expected, ColumnKind::Int32);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclassified_column() {
        let table = Table::new(vec![text("unknown", &[Some("x")])]).unwrap();
        let classification = Classification::builder(["known"]).build().unwrap();
        let err = apply_classification(&table, &classification, &options()).unwrap_err();
        assert!(matches!(err, TransformError::UnclassifiedColumn { .. }));
    }
}
