use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{KelsaError, KelsaResult};
use crate::record::fields::Field;

/// The user-entered field values of one letter.
///
/// Serialized as a flat JSON object keyed by [`Field::key`]. Keys that do not name a known
/// field are kept so a record survives a round trip through storage unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LetterRecord {
    values: BTreeMap<String, String>,
}

impl LetterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, including empty strings.
    pub fn raw(&self, field: Field) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    /// The value of `field` when it holds any non-whitespace text.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.raw(field).filter(|v| !v.trim().is_empty())
    }

    /// The value of `field`, or `""` when absent.
    pub fn value(&self, field: Field) -> &str {
        self.raw(field).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate stored `(key, value)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys that are stored but do not name a form field.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| Field::from_key(k).is_none())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_json_str(s: &str) -> KelsaResult<Self> {
        serde_json::from_str(s).map_err(|e| KelsaError::serde(e.to_string()))
    }

    pub fn to_json_string(&self) -> KelsaResult<String> {
        serde_json::to_string(self).map_err(|e| KelsaError::serde(e.to_string()))
    }

    /// Load a record from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> KelsaResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read letter json '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

impl FromIterator<(Field, String)> for LetterRecord {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/letter.rs"]
mod tests;
