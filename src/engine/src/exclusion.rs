//! Vocabulary exclusion lists configured per facet
//!
//! A global deny-list applied after scope resolution. It is not a tenant
//! boundary: it only ever removes vocabularies, never adds them.

use groupscope_core::Vocabulary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized list of excluded vocabulary ids or labels
///
/// Deserializes from either the raw textarea text (one entry per line) or a
/// list; entries that are not strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Vec<String>")]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl ExclusionList {
    /// Parse newline-separated text, dropping carriage returns and blank lines
    pub fn from_text(text: &str) -> Self {
        Self::from_entries(std::iter::once(text))
    }

    /// Normalize already-split entries (each may still contain newlines)
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for entry in entries {
            for line in entry.as_ref().split('\n') {
                let line = line.replace('\r', "");
                let line = line.trim();
                if !line.is_empty() && !normalized.iter().any(|e| e == line) {
                    normalized.push(line.to_string());
                }
            }
        }
        Self { entries: normalized }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a vocabulary is excluded by id or by label
    pub fn excludes(&self, vocabulary_id: &str, label: Option<&str>) -> bool {
        self.entries
            .iter()
            .any(|entry| entry == vocabulary_id || label.is_some_and(|l| entry == l))
    }

    /// Remove excluded vocabularies, keeping the order of the rest
    pub fn apply(&self, vocabularies: Vec<Vocabulary>) -> Vec<Vocabulary> {
        if self.is_empty() {
            return vocabularies;
        }
        vocabularies
            .into_iter()
            .filter(|v| !self.excludes(&v.id, Some(&v.label)))
            .collect()
    }
}

impl From<Value> for ExclusionList {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::from_text(&text),
            Value::Array(items) => Self::from_entries(items.iter().filter_map(Value::as_str)),
            _ => Self::default(),
        }
    }
}

impl From<ExclusionList> for Vec<String> {
    fn from(list: ExclusionList) -> Self {
        list.entries
    }
}
