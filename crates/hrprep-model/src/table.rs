//! Columnar in-memory table.
//!
//! A [`Table`] is a list of equally long named columns plus a row index
//! recording where each row sat in the originally loaded file. Filtering
//! produces a new table whose row index still points at the source rows.

use std::collections::{BTreeMap, BTreeSet};
use std::mem::size_of;

use half::f16;

use crate::error::{ModelError, Result};
use crate::rule::ColumnKind;
use crate::scale::{OrdinalScale, Rank};

/// Ordinal column: one compact code per cell.
///
/// Codes below `scale.len()` are ranks. Larger codes index into
/// `unranked`, the labels that were kept verbatim although they are not on
/// the scale. Such cells have a label but no rank.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColumn {
    scale: OrdinalScale,
    unranked: Vec<String>,
    unranked_codes: BTreeMap<String, Rank>,
    codes: Vec<Option<Rank>>,
}

impl OrdinalColumn {
    pub fn new(scale: OrdinalScale) -> Self {
        Self::with_capacity(scale, 0)
    }

    pub fn with_capacity(scale: OrdinalScale, capacity: usize) -> Self {
        Self {
            scale,
            unranked: Vec::new(),
            unranked_codes: BTreeMap::new(),
            codes: Vec::with_capacity(capacity),
        }
    }

    /// Append a cell. Returns `Ok(false)` when the label is not on the
    /// scale and was stored without a rank.
    ///
    /// # Errors
    ///
    /// Fails once scale and unranked labels together exceed the code range.
    pub fn push(&mut self, label: Option<&str>) -> Result<bool> {
        let Some(label) = label else {
            self.codes.push(None);
            return Ok(true);
        };
        if let Some(rank) = self.scale.rank(label) {
            self.codes.push(Some(rank));
            return Ok(true);
        }
        let code = match self.unranked_codes.get(label) {
            Some(code) => *code,
            None => {
                let code = Rank::try_from(self.scale.len() + self.unranked.len())
                    .map_err(|_| ModelError::TooManyLabels { max: Rank::MAX })?;
                self.unranked.push(label.to_string());
                self.unranked_codes.insert(label.to_string(), code);
                code
            }
        };
        self.codes.push(Some(code));
        Ok(false)
    }

    fn position(code: Rank) -> usize {
        usize::try_from(code).unwrap_or(usize::MAX)
    }

    /// Rank of the cell, `None` when missing or unranked.
    pub fn rank(&self, row: usize) -> Option<Rank> {
        self.codes
            .get(row)
            .copied()
            .flatten()
            .filter(|code| Self::position(*code) < self.scale.len())
    }

    /// Label of the cell, ranked or not.
    pub fn label(&self, row: usize) -> Option<&str> {
        let code = self.codes.get(row).copied().flatten()?;
        self.label_for_code(code)
    }

    fn label_for_code(&self, code: Rank) -> Option<&str> {
        let position = Self::position(code);
        if position < self.scale.len() {
            self.scale.labels().get(position).map(String::as_str)
        } else {
            self.unranked
                .get(position - self.scale.len())
                .map(String::as_str)
        }
    }

    pub fn scale(&self) -> &OrdinalScale {
        &self.scale
    }

    /// Out-of-scale labels kept by this column.
    pub fn unranked_labels(&self) -> &[String] {
        &self.unranked
    }

    /// Number of cells holding an unranked label.
    pub fn unranked_count(&self) -> usize {
        self.codes
            .iter()
            .flatten()
            .filter(|code| Self::position(**code) >= self.scale.len())
            .count()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn take(&self, rows: &[usize]) -> Self {
        Self {
            scale: self.scale.clone(),
            unranked: self.unranked.clone(),
            unranked_codes: self.unranked_codes.clone(),
            codes: rows.iter().map(|row| self.codes[*row]).collect(),
        }
    }

    fn estimated_size(&self) -> usize {
        self.codes.len() * size_of::<Option<Rank>>()
            + label_bytes(self.scale.labels())
            + label_bytes(&self.unranked)
    }
}

/// Nominal column: sorted dictionary of labels plus one code per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominalColumn {
    categories: Vec<String>,
    codes: Vec<Option<u32>>,
}

impl NominalColumn {
    /// Dictionary-encode a sequence of optional labels.
    pub fn from_labels<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let values: Vec<Option<&str>> = values.into_iter().collect();
        let unique: BTreeSet<&str> = values.iter().flatten().copied().collect();
        let lookup: BTreeMap<&str, u32> = unique
            .iter()
            .enumerate()
            .map(|(idx, label)| (*label, u32::try_from(idx).unwrap_or(u32::MAX)))
            .collect();
        let codes = values
            .iter()
            .map(|value| value.and_then(|label| lookup.get(label).copied()))
            .collect();
        Self {
            categories: unique.into_iter().map(str::to_string).collect(),
            codes,
        }
    }

    pub fn label(&self, row: usize) -> Option<&str> {
        let code = self.codes.get(row).copied().flatten()?;
        self.categories
            .get(usize::try_from(code).ok()?)
            .map(String::as_str)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn take(&self, rows: &[usize]) -> Self {
        Self {
            categories: self.categories.clone(),
            codes: rows.iter().map(|row| self.codes[*row]).collect(),
        }
    }

    fn estimated_size(&self) -> usize {
        self.codes.len() * size_of::<Option<u32>>() + label_bytes(&self.categories)
    }
}

fn label_bytes(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|label| size_of::<String>() + label.len())
        .sum()
}

/// Cell storage of a column, one variant per [`ColumnKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
    Int32(Vec<Option<i32>>),
    Float16(Vec<Option<f16>>),
    Ordinal(OrdinalColumn),
    Nominal(NominalColumn),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Text(_) => ColumnKind::Text,
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Int32(_) => ColumnKind::Int32,
            Self::Float16(_) => ColumnKind::Float16,
            Self::Ordinal(_) => ColumnKind::Ordinal,
            Self::Nominal(_) => ColumnKind::Nominal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(values) => values.len(),
            Self::Boolean(values) => values.len(),
            Self::Int32(values) => values.len(),
            Self::Float16(values) => values.len(),
            Self::Ordinal(column) => column.len(),
            Self::Nominal(column) => column.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cell at `row` holds no value.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Self::Text(values) => values.get(row).is_none_or(Option::is_none),
            Self::Boolean(values) => values.get(row).is_none_or(Option::is_none),
            Self::Int32(values) => values.get(row).is_none_or(Option::is_none),
            Self::Float16(values) => values.get(row).is_none_or(Option::is_none),
            Self::Ordinal(column) => column.label(row).is_none(),
            Self::Nominal(column) => column.label(row).is_none(),
        }
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|row| self.is_missing(*row)).count()
    }

    /// Text rendering of a cell, as it would be written back to a file.
    pub fn display(&self, row: usize) -> Option<String> {
        match self {
            Self::Text(values) => values.get(row).cloned().flatten(),
            Self::Boolean(values) => values.get(row).copied().flatten().map(|value| value.to_string()),
            Self::Int32(values) => values.get(row).copied().flatten().map(|value| value.to_string()),
            Self::Float16(values) => values.get(row).copied().flatten().map(|value| value.to_string()),
            Self::Ordinal(column) => column.label(row).map(str::to_string),
            Self::Nominal(column) => column.label(row).map(str::to_string),
        }
    }

    /// Select cells by position, in the given order.
    pub fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Text(values) => Self::Text(rows.iter().map(|row| values[*row].clone()).collect()),
            Self::Boolean(values) => Self::Boolean(rows.iter().map(|row| values[*row]).collect()),
            Self::Int32(values) => Self::Int32(rows.iter().map(|row| values[*row]).collect()),
            Self::Float16(values) => Self::Float16(rows.iter().map(|row| values[*row]).collect()),
            Self::Ordinal(column) => Self::Ordinal(column.take(rows)),
            Self::Nominal(column) => Self::Nominal(column.take(rows)),
        }
    }

    /// Approximate heap and inline bytes held by the column.
    pub fn estimated_size(&self) -> usize {
        match self {
            Self::Text(values) => values
                .iter()
                .map(|value| size_of::<Option<String>>() + value.as_ref().map_or(0, String::len))
                .sum(),
            Self::Boolean(values) => values.len() * size_of::<Option<bool>>(),
            Self::Int32(values) => values.len() * size_of::<Option<i32>>(),
            Self::Float16(values) => values.len() * size_of::<Option<f16>>(),
            Self::Ordinal(column) => column.estimated_size(),
            Self::Nominal(column) => column.estimated_size(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Text column from optional string cells.
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|value| value.map(Into::into)).collect();
        Self::new(name, ColumnData::Text(values))
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }
}

/// Ordered, equally long columns plus the source position of each row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_index: Vec<usize>,
}

impl Table {
    /// Build a table whose row index is `0..height`.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, |column| column.data.len());
        Self::with_row_index(columns, (0..height).collect())
    }

    /// Build a table with an explicit row index.
    ///
    /// # Errors
    ///
    /// Returns an error if column names repeat or any column length differs
    /// from the row index length.
    pub fn with_row_index(columns: Vec<Column>, row_index: Vec<usize>) -> Result<Self> {
        let mut names = BTreeSet::new();
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
            if column.data.len() != row_index.len() {
                return Err(ModelError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected: row_index.len(),
                    found: column.data.len(),
                });
            }
        }
        Ok(Self { columns, row_index })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.row_index.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Source position of every row.
    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    /// Select rows by position, keeping their source row index.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds.
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|column| Column::new(column.name.clone(), column.data.take(rows)))
                .collect(),
            row_index: rows.iter().map(|row| self.row_index[*row]).collect(),
        }
    }

    /// Keep rows whose mask entry is `true`, in their original order.
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.height() {
            return Err(ModelError::MaskLengthMismatch {
                expected: self.height(),
                found: mask.len(),
            });
        }
        let rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect();
        Ok(self.take(&rows))
    }

    /// Approximate bytes held by all columns and the row index.
    pub fn estimated_size(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.data.estimated_size())
            .sum::<usize>()
            + self.row_index.len() * size_of::<usize>()
    }
}
