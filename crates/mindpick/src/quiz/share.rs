//! Result deep links and the share URLs built from them.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static SHAREABLE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("shareable type regex is invalid"));

/// Query keys that may carry a result type, checked before the route segment.
pub const SHARE_TYPE_KEYS: [&str; 5] = ["type", "t", "r", "result", "code"];

/// Types that can appear verbatim in a path segment and query value.
pub fn is_shareable_type(value: &str) -> bool {
    SHAREABLE_TYPE.is_match(value)
}

/// `/<slug>/result/<TYPE>`.
pub fn result_path(slug: &str, outcome_type: &str) -> String {
    format!("/{slug}/result/{outcome_type}")
}

/// Share link for a result, or `None` when the type is not URL-safe.
pub fn share_url(origin: &str, slug: &str, outcome_type: &str) -> Option<String> {
    if !is_shareable_type(outcome_type) {
        return None;
    }
    Some(format!(
        "{}{}?share=1&r={outcome_type}",
        origin.trim_end_matches('/'),
        result_path(slug, outcome_type)
    ))
}

/// Result type requested by a deep link: the first non-empty query key in
/// [`SHARE_TYPE_KEYS`], else the route segment. Unsafe values are dropped.
pub fn detect_type(route_type: Option<&str>, query: &HashMap<String, String>) -> Option<String> {
    SHARE_TYPE_KEYS
        .iter()
        .filter_map(|key| query.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .or_else(|| route_type.map(str::trim).filter(|value| !value.is_empty()))
        .filter(|value| is_shareable_type(value))
        .map(str::to_string)
}
