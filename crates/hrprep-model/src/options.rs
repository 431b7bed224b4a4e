//! Configuration options for column typing.

use serde::{Deserialize, Serialize};

/// Handling of ordinal values that are not on the column's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Keep the raw label without a rank; it never satisfies a comparison.
    #[default]
    Permissive,
    /// Fail the conversion on the first unknown label.
    Strict,
}

/// Options controlling the typing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Policy for out-of-vocabulary ordinal labels.
    pub category_policy: CategoryPolicy,

    /// Log a warning per column that keeps unranked labels.
    pub warn_on_unranked: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            category_policy: CategoryPolicy::Permissive,
            warn_on_unranked: true,
        }
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject any ordinal label outside its scale.
    pub fn strict() -> Self {
        Self {
            category_policy: CategoryPolicy::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.category_policy = policy;
        self
    }

    #[must_use]
    pub fn with_warn_on_unranked(mut self, enable: bool) -> Self {
        self.warn_on_unranked = enable;
        self
    }
}
