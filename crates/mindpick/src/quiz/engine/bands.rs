use crate::quiz::results::ResultSpec;

/// Inclusive containment where a missing bound is open.
pub(super) fn within(value: f64, lower: Option<f64>, upper: Option<f64>) -> bool {
    lower.map_or(true, |lower| value >= lower) && upper.map_or(true, |upper| value <= upper)
}

/// First entry whose `range` holds `value`; missing bounds are open.
pub(super) fn first_in_range<'a>(entries: &'a [ResultSpec], value: f64) -> Option<&'a ResultSpec> {
    entries.iter().find(|entry| {
        let (lower, upper) = entry.range_bounds();
        within(value, lower, upper)
    })
}

/// First entry whose `min`/`max` holds `value`; missing bounds are open.
pub(super) fn first_in_min_max<'a>(entries: &'a [ResultSpec], value: f64) -> Option<&'a ResultSpec> {
    entries
        .iter()
        .find(|entry| within(value, entry.min_bound(), entry.max_bound()))
}
