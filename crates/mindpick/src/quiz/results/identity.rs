use super::spec::ResultSpec;
use crate::quiz::document::{scalar_text, truthy_text};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static MBTI_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[EI][SN][TF][JP]$").expect("mbti code regex is invalid"));
static EMBEDDED_MBTI_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[EI][SN][TF][JP]").expect("embedded mbti regex is invalid"));

/// Scalar fields compared against the outcome type.
pub const IDENTITY_FIELDS: [&str; 9] = [
    "id", "type", "code", "mbti", "slug", "key", "value", "tag", "kind",
];

type IdentityExtractor = fn(&ResultSpec) -> Vec<String>;

/// Every extractor yields upper-cased candidates; an entry matches when the
/// outcome type is among the union of all of them.
pub const IDENTITY_EXTRACTORS: [(&str, IdentityExtractor); 3] = [
    ("fields", identity_fields),
    ("types", listed_types),
    ("title_codes", title_codes),
];

/// Four-letter MBTI code, after trimming, in any case.
pub fn is_mbti_code(value: &str) -> bool {
    MBTI_CODE.is_match(&value.trim().to_uppercase())
}

/// Distinct MBTI codes found anywhere in `text`, in order of appearance.
pub fn embedded_codes(text: &str) -> Vec<String> {
    let upper = text.to_uppercase();
    let mut codes: Vec<String> = Vec::new();
    for found in EMBEDDED_MBTI_CODE.find_iter(&upper) {
        if !codes.iter().any(|code| code == found.as_str()) {
            codes.push(found.as_str().to_string());
        }
    }
    codes
}

fn identity_fields(entry: &ResultSpec) -> Vec<String> {
    IDENTITY_FIELDS
        .iter()
        .filter_map(|field| entry.get(field).and_then(truthy_text))
        .map(|value| value.to_uppercase())
        .collect()
}

fn listed_types(entry: &ResultSpec) -> Vec<String> {
    entry
        .get("types")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(scalar_text)
                .map(|value| value.to_uppercase())
                .collect()
        })
        .unwrap_or_default()
}

/// Embedded codes can only equal an MBTI-shaped type, so non-MBTI outcomes
/// never match through the title.
fn title_codes(entry: &ResultSpec) -> Vec<String> {
    entry
        .get("title")
        .and_then(scalar_text)
        .map(|title| embedded_codes(&title))
        .unwrap_or_default()
}

/// Case-insensitive identity match of `entry` against `outcome_type`.
pub fn matches(entry: &ResultSpec, outcome_type: &str) -> bool {
    let wanted = outcome_type.to_uppercase();
    IDENTITY_EXTRACTORS
        .iter()
        .any(|(_, extract)| extract(entry).iter().any(|candidate| *candidate == wanted))
}
