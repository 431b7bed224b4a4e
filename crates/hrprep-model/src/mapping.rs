//! Value to boolean lookup tables for two-factor columns.

use serde::{Deserialize, Serialize};

/// Source value recognised by a [`BooleanMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingKey {
    /// Matches a trimmed cell with exactly this text.
    Text(String),
    /// Matches any cell whose text parses to this number (`"1"` and `"1.0"` both match `1.0`).
    Number(f64),
}

impl MappingKey {
    fn matches(&self, trimmed: &str, parsed: Option<f64>) -> bool {
        match self {
            Self::Text(text) => text == trimmed,
            Self::Number(number) => parsed.is_some_and(|value| value == *number),
        }
    }
}

impl std::fmt::Display for MappingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{number:?}"),
        }
    }
}

/// Explicit mapping from observed values to `true`/`false`.
///
/// Values that are not listed have no mapping; the caller decides whether
/// that is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanMapping {
    entries: Vec<(MappingKey, bool)>,
}

impl BooleanMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a text value.
    #[must_use]
    pub fn text(mut self, key: impl Into<String>, value: bool) -> Self {
        self.entries.push((MappingKey::Text(key.into()), value));
        self
    }

    /// Map a numeric value.
    #[must_use]
    pub fn number(mut self, key: f64, value: bool) -> Self {
        self.entries.push((MappingKey::Number(key), value));
        self
    }

    /// Look up a raw cell. Text keys are tried before numeric keys.
    pub fn lookup(&self, raw: &str) -> Option<bool> {
        let trimmed = raw.trim();
        let parsed = trimmed.parse::<f64>().ok();
        self.entries
            .iter()
            .filter(|(key, _)| matches!(key, MappingKey::Text(_)))
            .chain(
                self.entries
                    .iter()
                    .filter(|(key, _)| matches!(key, MappingKey::Number(_))),
            )
            .find(|(key, _)| key.matches(trimmed, parsed))
            .map(|(_, value)| *value)
    }

    /// First key mapped to `value`, used to write a flag back in its
    /// source form.
    pub fn key_for(&self, value: bool) -> Option<&MappingKey> {
        self.entries
            .iter()
            .find(|(_, mapped)| *mapped == value)
            .map(|(key, _)| key)
    }

    pub fn entries(&self) -> &[(MappingKey, bool)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_keys_match_equivalent_text() {
        let mapping = BooleanMapping::new().number(0.0, false).number(1.0, true);
        assert_eq!(mapping.lookup("0.0"), Some(false));
        assert_eq!(mapping.lookup("1"), Some(true));
        assert_eq!(mapping.lookup(" 1.0 "), Some(true));
        assert_eq!(mapping.lookup("2.0"), None);
        assert_eq!(mapping.lookup("yes"), None);
    }

    #[test]
    fn text_keys_match_exactly() {
        let mapping = BooleanMapping::new()
            .text("No relevant experience", false)
            .text("Has relevant experience", true);
        assert_eq!(mapping.lookup("Has relevant experience"), Some(true));
        assert_eq!(mapping.lookup("has relevant experience"), None);
    }

    #[test]
    fn key_for_returns_first_source_value() {
        let mapping = BooleanMapping::new()
            .text("no", false)
            .number(0.0, false)
            .number(1.0, true);
        assert_eq!(mapping.key_for(false), Some(&MappingKey::Text("no".to_string())));
        assert_eq!(mapping.key_for(true), Some(&MappingKey::Number(1.0)));
        assert_eq!(BooleanMapping::new().key_for(true), None);
    }

    #[test]
    fn key_display() {
        assert_eq!(MappingKey::Number(1.0).to_string(), "1.0");
        assert_eq!(MappingKey::Text("No".to_string()).to_string(), "No");
    }
}
