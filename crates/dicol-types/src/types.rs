use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::keys;

pub const DEFINITION_NOT_FOUND: &str = "Definición no encontrada.";
pub const EXAMPLE_NOT_FOUND: &str = "Ejemplo no encontrado.";

/// Dictionary entry exactly as the store returned it.
///
/// Only the headword is interpreted here; everything else is resolved by the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntry(pub Value);

impl RawEntry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Headword, if present as a non-empty string
    pub fn headword(&self) -> Option<&str> {
        self.0
            .get(keys::HEADWORD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Store-assigned identifier
    pub fn id(&self) -> Option<&str> {
        self.0.get(keys::ID).and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Resolved example text.
///
/// `Raw` holds a value taken from a nested example sequence without checking
/// its type; it is written to the output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Example {
    Text(String),
    Raw(Value),
}

impl Example {
    pub fn not_found() -> Self {
        Example::Text(EXAMPLE_NOT_FOUND.to_string())
    }

    /// Trim text examples; raw values pass through
    pub fn trimmed(self) -> Self {
        match self {
            Example::Text(text) => Example::Text(text.trim().to_string()),
            Example::Raw(value) => Example::Raw(value),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Example::Text(text) => Some(text),
            Example::Raw(_) => None,
        }
    }
}

impl From<&str> for Example {
    fn from(text: &str) -> Self {
        Example::Text(text.to_string())
    }
}

/// One flattened (word, meaning, example) row of the output dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(rename = "palabra")]
    pub word: String,
    #[serde(rename = "significado")]
    pub meaning: String,
    #[serde(rename = "ejemplo")]
    pub example: Example,
    /// Reserved, always empty
    #[serde(rename = "región")]
    pub region: String,
}

impl NormalizedRecord {
    pub fn new(word: &str, meaning: &str, example: Example) -> Self {
        Self {
            word: word.to_string(),
            meaning: meaning.trim().to_string(),
            example: example.trimmed(),
            region: String::new(),
        }
    }
}
