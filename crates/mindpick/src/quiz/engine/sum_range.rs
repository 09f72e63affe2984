use super::{EngineKind, ScoredOutcome};
use crate::quiz::answers::Answers;
use crate::quiz::normalizer::NormalizedQuiz;
use crate::quiz::results::ResultSpec;
use tracing::debug;

pub(super) fn score(quiz: &NormalizedQuiz, answers: &Answers) -> ScoredOutcome {
    let total: f64 = quiz
        .questions
        .iter()
        .filter_map(|question| answers.chosen_option(question))
        .map(|option| option.score.unwrap_or(0.0))
        .sum();

    let band = pick_band(&quiz.results, total).cloned();
    if band.is_none() {
        debug!(total, "sum-range quiz has no result entries");
    }

    ScoredOutcome {
        outcome_type: band.as_ref().and_then(ResultSpec::id_text),
        score: Some(total),
        max: None,
        band,
        tally: None,
        engine: EngineKind::SumRange,
    }
}

/// First entry containing `total` in its `range` (missing reads as `[0, 0]`),
/// else the entry with the nearest range midpoint. Equal distances keep the
/// earlier entry.
pub(crate) fn pick_band(entries: &[ResultSpec], total: f64) -> Option<&ResultSpec> {
    let closed = |entry: &ResultSpec| {
        let (lower, upper) = entry.range_bounds();
        (lower.unwrap_or(0.0), upper.unwrap_or(0.0))
    };

    if let Some(hit) = entries.iter().find(|entry| {
        let (lower, upper) = closed(entry);
        total >= lower && total <= upper
    }) {
        return Some(hit);
    }

    let distance = |entry: &ResultSpec| {
        let (lower, upper) = closed(entry);
        ((lower + upper) / 2.0 - total).abs()
    };

    entries.iter().fold(None, |nearest, entry| match nearest {
        Some(current) if distance(entry) >= distance(current) => Some(current),
        _ => Some(entry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<ResultSpec> {
        serde_json::from_value(value).expect("result entries")
    }

    #[test]
    fn contained_total_picks_first_matching_range() {
        let catalog = entries(json!([
            { "id": "A", "range": [0, 5] },
            { "id": "B", "range": [6, 10] },
            { "id": "C", "range": [6, 12] }
        ]));
        assert_eq!(pick_band(&catalog, 7.0).and_then(ResultSpec::id), Some("B"));
    }

    #[test]
    fn out_of_range_total_picks_nearest_midpoint() {
        let catalog = entries(json!([
            { "id": "A", "range": [0, 5] },
            { "id": "B", "range": [6, 10] }
        ]));
        assert_eq!(pick_band(&catalog, 20.0).and_then(ResultSpec::id), Some("B"));
        assert_eq!(pick_band(&catalog, -3.0).and_then(ResultSpec::id), Some("A"));
    }

    #[test]
    fn midpoint_ties_keep_the_earlier_entry() {
        let catalog = entries(json!([
            { "id": "low", "range": [0, 2] },
            { "id": "high", "range": [6, 8] }
        ]));
        assert_eq!(pick_band(&catalog, 4.0).and_then(ResultSpec::id), Some("low"));
    }

    #[test]
    fn missing_range_reads_as_zero() {
        let catalog = entries(json!([{ "id": "none" }, { "id": "far", "range": [50, 60] }]));
        assert_eq!(pick_band(&catalog, 0.0).and_then(ResultSpec::id), Some("none"));
        assert_eq!(pick_band(&catalog, 10.0).and_then(ResultSpec::id), Some("none"));
    }

    #[test]
    fn empty_catalog_has_no_band() {
        assert!(pick_band(&[], 3.0).is_none());
    }
}
