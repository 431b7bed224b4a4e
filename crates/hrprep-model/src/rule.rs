//! Per-column conversion rules and the representations they produce.

use serde::{Deserialize, Serialize};

use crate::mapping::BooleanMapping;
use crate::scale::OrdinalScale;

/// How one column is re-typed.
///
/// A classification assigns exactly one rule to every schema column; the
/// dispatcher interprets the rule, so adding a column class never means
/// adding a branch on column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum ColumnRule {
    /// Two-factor column translated through an explicit lookup table.
    Boolean(BooleanMapping),
    /// Integer column narrowed to a 32-bit signed integer.
    Int32,
    /// Float column rounded to 16-bit precision.
    Float16,
    /// Ordered categories ranked by list position.
    Ordinal(OrdinalScale),
    /// Unordered categories; equality comparisons only.
    Nominal,
}

impl ColumnRule {
    /// Representation the rule produces.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Int32 => ColumnKind::Int32,
            Self::Float16 => ColumnKind::Float16,
            Self::Ordinal(_) => ColumnKind::Ordinal,
            Self::Nominal => ColumnKind::Nominal,
        }
    }
}

/// Physical representation of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Untyped text as loaded from the source file.
    Text,
    Boolean,
    Int32,
    Float16,
    Ordinal,
    Nominal,
}

impl ColumnKind {
    /// Returns a human-readable name for summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "bool",
            Self::Int32 => "int32",
            Self::Float16 => "float16",
            Self::Ordinal => "ordinal",
            Self::Nominal => "nominal",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
