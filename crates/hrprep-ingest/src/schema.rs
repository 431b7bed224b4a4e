//! Header checks against the expected schema.

use std::collections::BTreeSet;

use hrprep_model::Table;

use crate::error::{IngestError, Result};

/// Verify that the table has exactly the expected columns.
///
/// Column order is not checked; names are compared exactly.
pub fn check_schema<S: AsRef<str>>(table: &Table, expected: &[S]) -> Result<()> {
    let expected: BTreeSet<&str> = expected.iter().map(|name| name.as_ref()).collect();
    let actual: BTreeSet<&str> = table.column_names().into_iter().collect();

    let missing: Vec<String> = expected
        .difference(&actual)
        .map(|name| (*name).to_string())
        .collect();
    let unexpected: Vec<String> = actual
        .difference(&expected)
        .map(|name| (*name).to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    tracing::error!(?missing, ?unexpected, "schema mismatch");
    Err(IngestError::SchemaMismatch {
        missing,
        unexpected,
    })
}
