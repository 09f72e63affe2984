use crate::quiz::document::{as_number, scalar_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a quiz's result catalog. Only identity and band fields are
/// interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSpec(Map<String, Value>);

impl ResultSpec {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// String value of `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    /// `id` as text, including numeric ids.
    pub fn id_text(&self) -> Option<String> {
        self.0.get("id").and_then(scalar_text)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn label(&self) -> Option<&str> {
        self.text("label")
    }

    /// `range: [min, max]`. Each side is absent when missing or non-numeric.
    pub fn range_bounds(&self) -> (Option<f64>, Option<f64>) {
        match self.0.get("range").and_then(Value::as_array) {
            Some(range) => (
                range.first().and_then(as_number),
                range.get(1).and_then(as_number),
            ),
            None => (None, None),
        }
    }

    pub fn min_bound(&self) -> Option<f64> {
        self.0.get("min").and_then(as_number)
    }

    pub fn max_bound(&self) -> Option<f64> {
        self.0.get("max").and_then(as_number)
    }
}

impl From<Map<String, Value>> for ResultSpec {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
