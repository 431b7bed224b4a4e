//! Conversion of typed tables back to Polars and CSV.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use hrprep_model::{BooleanMapping, Classification, ColumnData, ColumnRule, Table};

use crate::error::{Result, TransformError};

/// Name of the leading column written when the row index is exported.
pub const ROW_INDEX_COLUMN: &str = "row_index";

fn labels<'a>(len: usize, label: impl Fn(usize) -> Option<&'a str>) -> Vec<Option<&'a str>> {
    (0..len).map(label).collect()
}

/// Flags written as the source values their mapping reads back.
fn mapped_flags(
    values: &[Option<bool>],
    mapping: &BooleanMapping,
) -> Option<Vec<Option<String>>> {
    let no = mapping.key_for(false)?.to_string();
    let yes = mapping.key_for(true)?.to_string();
    Some(
        values
            .iter()
            .map(|value| value.map(|flag| if flag { yes.clone() } else { no.clone() }))
            .collect(),
    )
}

fn to_polars_column(name: &str, data: &ColumnData, rule: Option<&ColumnRule>) -> Column {
    let name: PlSmallStr = name.into();
    match data {
        ColumnData::Text(values) => Column::new(name, values.clone()),
        ColumnData::Boolean(values) => match rule {
            Some(ColumnRule::Boolean(mapping)) => match mapped_flags(values, mapping) {
                Some(labels) => Column::new(name, labels),
                None => Column::new(name, values.clone()),
            },
            _ => Column::new(name, values.clone()),
        },
        ColumnData::Int32(values) => Column::new(name, values.clone()),
        // No 16-bit float dtype in Polars; widening is lossless.
        ColumnData::Float16(values) => {
            let widened: Vec<Option<f32>> = values
                .iter()
                .map(|value| value.map(|v| v.to_f32()))
                .collect();
            Column::new(name, widened)
        }
        ColumnData::Ordinal(column) => {
            Column::new(name, labels(column.len(), |row| column.label(row)))
        }
        ColumnData::Nominal(column) => {
            Column::new(name, labels(column.len(), |row| column.label(row)))
        }
    }
}

/// Build a DataFrame with one column per table column, in table order.
///
/// Ordinal and nominal columns are written as their labels. Boolean columns
/// whose rule maps both values are written as the mapped source values, so
/// the output loads and types again under the same classification. With
/// `include_index`, a leading [`ROW_INDEX_COLUMN`] holds each row's source
/// position.
pub fn table_to_frame(
    table: &Table,
    classification: &Classification,
    include_index: bool,
) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.width() + usize::from(include_index));
    if include_index {
        let index: Vec<u64> = table.row_index().iter().map(|row| *row as u64).collect();
        columns.push(Column::new(ROW_INDEX_COLUMN.into(), index));
    }
    for column in table.columns() {
        let rule = classification.rule_for(&column.name);
        columns.push(to_polars_column(&column.name, &column.data, rule));
    }
    Ok(DataFrame::new(columns)?)
}

/// Write the table as a comma separated file with a header row.
pub fn write_csv(
    table: &Table,
    classification: &Classification,
    path: &Path,
    include_index: bool,
) -> Result<()> {
    let mut df = table_to_frame(table, classification, include_index)?;
    let mut file = File::create(path).map_err(|source| TransformError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote csv"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrprep_model::{Column as TableColumn, NominalColumn, f16};

    fn classification() -> Classification {
        Classification::builder(["flag", "hours", "index", "city", "raw_flag"])
            .boolean(
                "flag",
                BooleanMapping::new().number(0.0, false).number(1.0, true),
            )
            .int32("hours")
            .float16("index")
            .nominal("city")
            .build()
            .unwrap()
    }

    fn sample() -> Table {
        Table::with_row_index(
            vec![
                TableColumn::new("flag", ColumnData::Boolean(vec![Some(true), None])),
                TableColumn::new("hours", ColumnData::Int32(vec![Some(36), Some(47)])),
                TableColumn::new(
                    "index",
                    ColumnData::Float16(vec![Some(f16::from_f32(0.5)), None]),
                ),
                TableColumn::new(
                    "city",
                    ColumnData::Nominal(NominalColumn::from_labels([Some("city_40"), None])),
                ),
                TableColumn::new("raw_flag", ColumnData::Boolean(vec![Some(false), Some(true)])),
            ],
            vec![3, 8],
        )
        .unwrap()
    }

    #[test]
    fn test_frame_dtypes() {
        let df = table_to_frame(&sample(), &classification(), false).unwrap();
        let dtypes: Vec<DataType> = df.dtypes();
        assert_eq!(
            dtypes,
            vec![
                DataType::String,
                DataType::Int32,
                DataType::Float32,
                DataType::String,
                DataType::Boolean
            ]
        );
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_flags_use_mapping_keys() {
        let df = table_to_frame(&sample(), &classification(), false).unwrap();
        let flags: Vec<Option<&str>> = df
            .column("flag")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flags, vec![Some("1.0"), None]);
    }

    #[test]
    fn test_frame_with_index() {
        let df = table_to_frame(&sample(), &classification(), true).unwrap();
        assert_eq!(df.get_column_names()[0].as_str(), ROW_INDEX_COLUMN);
        let index: Vec<Option<u64>> = df
            .column(ROW_INDEX_COLUMN)
            .unwrap()
            .u64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(index, vec![Some(3), Some(8)]);
    }
}
