//! Ordinal scales: finite label sets ordered by list position.
//!
//! The rank of a label is its index in the scale, never its lexical or
//! numeric value. `"<1"` sorts below `"1"` and `">20"` above `"20"` only
//! because the scale lists them that way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Rank of a label within an [`OrdinalScale`].
pub type Rank = u32;

/// An ordered list of category labels, low to high.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct OrdinalScale {
    labels: Vec<String>,
    ranks: BTreeMap<String, Rank>,
}

impl OrdinalScale {
    /// Build a scale from labels listed low to high.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ModelError::EmptyScale);
        }
        let mut ranks = BTreeMap::new();
        for (idx, label) in labels.iter().enumerate() {
            let rank = Rank::try_from(idx)
                .map_err(|_| ModelError::TooManyLabels { max: Rank::MAX })?;
            if ranks.insert(label.clone(), rank).is_some() {
                return Err(ModelError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        Ok(Self { labels, ranks })
    }

    /// Rank of `label`, or `None` when the label is not on the scale.
    pub fn rank(&self, label: &str) -> Option<Rank> {
        self.ranks.get(label).copied()
    }

    /// Label at `rank`.
    pub fn label(&self, rank: Rank) -> Option<&str> {
        let position = usize::try_from(rank).ok()?;
        self.labels.get(position).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.ranks.contains_key(label)
    }

    /// Labels in rank order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TryFrom<Vec<String>> for OrdinalScale {
    type Error = ModelError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<OrdinalScale> for Vec<String> {
    fn from(scale: OrdinalScale) -> Self {
        scale.labels
    }
}
