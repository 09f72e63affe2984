use super::spec::ResultSpec;
use serde_json::{Map, Value};

/// Catalog fields in lookup order; the first one with entries wins.
pub const CATALOG_KEYS: [&str; 5] = ["results", "outcomes", "profiles", "personas", "types"];

/// Flattens the quiz's result catalog into ordered entries. Keyed catalogs
/// use the key as `id` unless the entry declares its own.
pub fn normalize_catalog(quiz: &Map<String, Value>) -> Vec<ResultSpec> {
    CATALOG_KEYS
        .iter()
        .filter_map(|key| quiz.get(*key))
        .map(entries)
        .find(|entries| !entries.is_empty())
        .unwrap_or_default()
}

/// `result_bands` entries, used by MCQ quizzes.
pub fn result_bands(quiz: &Map<String, Value>) -> Vec<ResultSpec> {
    quiz.get("result_bands").map(entries).unwrap_or_default()
}

fn entries(value: &Value) -> Vec<ResultSpec> {
    match value {
        Value::Array(list) => list
            .iter()
            .filter_map(Value::as_object)
            .cloned()
            .map(ResultSpec::from_map)
            .collect(),
        Value::Object(keyed) => keyed
            .iter()
            .filter_map(|(key, entry)| keyed_entry(key, entry))
            .collect(),
        _ => Vec::new(),
    }
}

fn keyed_entry(key: &str, entry: &Value) -> Option<ResultSpec> {
    let fields = entry.as_object()?;
    let mut flattened = Map::with_capacity(fields.len() + 1);
    flattened.insert("id".to_string(), Value::String(key.to_string()));
    for (field, value) in fields {
        flattened.insert(field.clone(), value.clone());
    }
    Some(ResultSpec::from_map(flattened))
}
