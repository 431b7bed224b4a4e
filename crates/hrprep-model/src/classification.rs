//! Column classification: the static table mapping each column to its rule.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::mapping::BooleanMapping;
use crate::rule::ColumnRule;
use crate::scale::OrdinalScale;

/// A schema column together with the rule that re-types it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub rule: ColumnRule,
}

/// Immutable mapping from every schema column to exactly one [`ColumnRule`].
///
/// Specs are kept in schema order. Use [`Classification::builder`] to
/// construct one; the builder guarantees the mapping is exhaustive and
/// that no column sits in two classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    columns: Vec<ColumnSpec>,
}

impl Classification {
    /// Start a classification over the given schema columns.
    pub fn builder<I, S>(schema: I) -> ClassificationBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassificationBuilder {
            schema: schema.into_iter().map(Into::into).collect(),
            assigned: Vec::new(),
        }
    }

    /// Rule for `column`, if the column is part of the schema.
    pub fn rule_for(&self, column: &str) -> Option<&ColumnRule> {
        self.columns
            .iter()
            .find(|spec| spec.name == column)
            .map(|spec| &spec.rule)
    }

    /// Column specs in schema order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in schema order.
    pub fn schema(&self) -> Vec<&str> {
        self.columns.iter().map(|spec| spec.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Builder for [`Classification`].
///
/// Columns given an explicit rule take it; every other schema column
/// falls into the nominal default class.
#[derive(Debug, Clone)]
pub struct ClassificationBuilder {
    schema: Vec<String>,
    assigned: Vec<(String, ColumnRule)>,
}

impl ClassificationBuilder {
    #[must_use]
    pub fn boolean(self, column: impl Into<String>, mapping: BooleanMapping) -> Self {
        self.rule(column, ColumnRule::Boolean(mapping))
    }

    #[must_use]
    pub fn int32(self, column: impl Into<String>) -> Self {
        self.rule(column, ColumnRule::Int32)
    }

    #[must_use]
    pub fn float16(self, column: impl Into<String>) -> Self {
        self.rule(column, ColumnRule::Float16)
    }

    #[must_use]
    pub fn ordinal(self, column: impl Into<String>, scale: OrdinalScale) -> Self {
        self.rule(column, ColumnRule::Ordinal(scale))
    }

    #[must_use]
    pub fn nominal(self, column: impl Into<String>) -> Self {
        self.rule(column, ColumnRule::Nominal)
    }

    /// Assign an arbitrary rule to a column.
    #[must_use]
    pub fn rule(mut self, column: impl Into<String>, rule: ColumnRule) -> Self {
        self.assigned.push((column.into(), rule));
        self
    }

    /// Validate the assignments and produce the classification.
    ///
    /// # Errors
    ///
    /// - [`ModelError::DuplicateColumn`] if the schema lists a column twice
    /// - [`ModelError::UnknownColumn`] if a rule names a column outside the schema
    /// - [`ModelError::DuplicateClassification`] if a column receives two rules
    pub fn build(self) -> Result<Classification> {
        let mut schema_names = BTreeSet::new();
        for name in &self.schema {
            if !schema_names.insert(name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for (column, _) in &self.assigned {
            if !schema_names.contains(column.as_str()) {
                return Err(ModelError::UnknownColumn {
                    column: column.clone(),
                });
            }
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateClassification {
                    column: column.clone(),
                });
            }
        }

        let mut assigned = self.assigned;
        let columns = self
            .schema
            .into_iter()
            .map(|name| {
                let rule = assigned
                    .iter()
                    .position(|(column, _)| *column == name)
                    .map(|idx| assigned.swap_remove(idx).1)
                    .unwrap_or(ColumnRule::Nominal);
                ColumnSpec { name, rule }
            })
            .collect();
        Ok(Classification { columns })
    }
}
