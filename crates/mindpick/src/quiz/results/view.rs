use super::spec::ResultSpec;
use crate::quiz::document::scalar_text;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\n•\-]\s*").expect("list separator regex is invalid"));

const SUMMARY_KEYS: [&str; 5] = ["summary", "subtitle", "short", "tagline", "caption"];
const DESC_KEYS: [&str; 9] = [
    "desc",
    "description",
    "detail",
    "details",
    "content",
    "body",
    "explain",
    "text",
    "about",
];
const STRENGTH_KEYS: [&str; 4] = ["strengths", "pros", "good", "advantages"];
const CAUTION_KEYS: [&str; 5] = ["cautions", "cons", "warnings", "weaknesses", "risks"];
const TIP_KEYS: [&str; 5] = ["tips", "advice", "suggestions", "actions", "recommendations"];
const GOOD_MATCH_KEYS: [&str; 4] = ["good_match", "best_match", "compatible", "match_good"];
const BAD_MATCH_KEYS: [&str; 5] = ["bad_match", "avoid", "incompatible", "worst_match", "match_bad"];
const HASHTAG_KEYS: [&str; 2] = ["hashtags", "tags"];
const IMAGE_KEYS: [&str; 4] = ["image", "img", "thumbnail", "thumb"];

/// Fields the view derives; they replace the raw values of the same name.
const DERIVED_KEYS: [&str; 9] = [
    "summary",
    "desc",
    "strengths",
    "cautions",
    "tips",
    "good_match",
    "bad_match",
    "hashtags",
    "image",
];

/// Display-ready result: descriptive fields resolved through their synonyms,
/// list fields split into items, everything else passed through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub summary: String,
    pub desc: String,
    pub strengths: Vec<String>,
    pub cautions: Vec<String>,
    pub tips: Vec<String>,
    pub good_match: Vec<String>,
    pub bad_match: Vec<String>,
    pub hashtags: Vec<String>,
    pub image: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResultView {
    pub fn from_spec(spec: &ResultSpec) -> Self {
        let raw = spec.as_map();

        Self {
            summary: first_non_empty(raw, &SUMMARY_KEYS),
            desc: first_non_empty(raw, &DESC_KEYS),
            strengths: list(raw, &STRENGTH_KEYS),
            cautions: list(raw, &CAUTION_KEYS),
            tips: list(raw, &TIP_KEYS),
            good_match: list(raw, &GOOD_MATCH_KEYS),
            bad_match: list(raw, &BAD_MATCH_KEYS),
            hashtags: list(raw, &HASHTAG_KEYS),
            image: first_truthy(raw, &IMAGE_KEYS).and_then(scalar_text),
            fields: raw
                .iter()
                .filter(|(key, _)| !DERIVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

impl From<&ResultSpec> for ResultView {
    fn from(spec: &ResultSpec) -> Self {
        Self::from_spec(spec)
    }
}

/// First non-blank string or non-empty array; arrays are joined by newlines.
fn first_non_empty(raw: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find_map(|value| match value {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Array(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

/// First value that is not `null`, `false`, `0` or an empty string.
fn first_truthy<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| raw.get(*key)).find(|value| match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn list(raw: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    match first_truthy(raw, keys) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(text)) => LIST_SEPARATOR
            .split(text)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
