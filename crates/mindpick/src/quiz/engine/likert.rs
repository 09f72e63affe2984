use super::bands::first_in_range;
use super::{EngineKind, ScoredOutcome};
use crate::quiz::answers::Answers;
use crate::quiz::normalizer::{NormalizedQuiz, Question};

/// Per-question ceiling when the quiz declares no `option_scores`.
pub const DEFAULT_LIKERT_ROW_MAX: f64 = 4.0;

pub(super) fn score(quiz: &NormalizedQuiz, answers: &Answers) -> ScoredOutcome {
    let option_scores = quiz.scoring.option_scores.as_deref();

    let total: f64 = quiz
        .questions
        .iter()
        .map(|question| contribution(question, answers.selected_index(question), option_scores))
        .sum();

    let max: f64 = quiz
        .questions
        .iter()
        .map(|question| row_max(question, option_scores))
        .sum();

    ScoredOutcome {
        outcome_type: Some(EngineKind::Likert.label().to_string()),
        score: Some(total),
        max: Some(max),
        band: first_in_range(&quiz.results, total).cloned(),
        tally: None,
        engine: EngineKind::Likert,
    }
}

/// Option `score`, then `option_scores[index]` (missing entry is 0), then the index.
fn contribution(question: &Question, index: i64, option_scores: Option<&[f64]>) -> f64 {
    if let Some(explicit) = question.option_at(index).and_then(|option| option.score) {
        return explicit;
    }

    match option_scores {
        Some(scores) => usize::try_from(index)
            .ok()
            .and_then(|index| scores.get(index))
            .copied()
            .unwrap_or(0.0),
        None => index as f64,
    }
}

fn row_max(question: &Question, option_scores: Option<&[f64]>) -> f64 {
    let declared = option_scores
        .and_then(|scores| scores.iter().copied().reduce(f64::max))
        .unwrap_or(DEFAULT_LIKERT_ROW_MAX);

    question
        .options
        .iter()
        .filter_map(|option| option.score)
        .fold(declared, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::normalize;
    use serde_json::json;

    #[test]
    fn explicit_option_scores_raise_the_row_max() {
        let quiz = normalize(&json!({
            "type": "likert",
            "questions": [{ "options": [{ "score": 1 }, { "score": 9 }] }]
        }))
        .expect("normalizes");
        assert_eq!(row_max(&quiz.questions[0], None), 9.0);
    }

    #[test]
    fn declared_scale_sets_the_row_max() {
        let quiz = normalize(&json!({ "type": "likert", "questions": [{ "options": [{}, {}] }] }))
            .expect("normalizes");
        assert_eq!(row_max(&quiz.questions[0], Some(&[0.0, 2.0, 6.0])), 6.0);
        assert_eq!(row_max(&quiz.questions[0], Some(&[])), DEFAULT_LIKERT_ROW_MAX);
        assert_eq!(row_max(&quiz.questions[0], None), DEFAULT_LIKERT_ROW_MAX);
    }

    #[test]
    fn contribution_falls_back_from_option_to_scale_to_index() {
        let quiz = normalize(&json!({
            "type": "likert",
            "questions": [{ "options": [{ "score": 5 }, {}, {}] }]
        }))
        .expect("normalizes");
        let question = &quiz.questions[0];
        assert_eq!(contribution(question, 0, Some(&[1.0, 2.0])), 5.0);
        assert_eq!(contribution(question, 1, Some(&[1.0, 2.0])), 2.0);
        assert_eq!(contribution(question, 2, Some(&[1.0, 2.0])), 0.0);
        assert_eq!(contribution(question, 2, None), 2.0);
        assert_eq!(contribution(question, -1, Some(&[1.0])), 0.0);
    }
}
