//! Conversion of a loaded DataFrame into a text [`Table`].

use polars::prelude::*;

use hrprep_model::{Column as TableColumn, Table};

use crate::error::Result;

/// Normalizes a header value: trims whitespace and a stray BOM.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Normalizes a cell: trimmed, `None` when blank.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Convert every frame column into a text column.
///
/// Non-string dtypes are cast to String first, so the result never
/// depends on what Polars inferred.
pub fn table_from_frame(df: &DataFrame) -> Result<Table> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = normalize_header(column.name().as_str());
        let casted = column.cast(&DataType::String)?;
        let values: Vec<Option<String>> = casted
            .str()?
            .into_iter()
            .map(|value| value.and_then(normalize_cell))
            .collect();
        columns.push(TableColumn::text(name, values));
    }
    Ok(Table::new(columns)?)
}
