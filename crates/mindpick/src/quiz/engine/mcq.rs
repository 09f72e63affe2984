use super::bands::first_in_min_max;
use super::{EngineKind, ScoredOutcome};
use crate::quiz::answers::Answers;
use crate::quiz::normalizer::NormalizedQuiz;

pub(super) fn score(quiz: &NormalizedQuiz, answers: &Answers) -> ScoredOutcome {
    let correct = quiz
        .questions
        .iter()
        .filter(|question| {
            question.correct_index.is_some_and(|expected| {
                answers
                    .get(&question.id)
                    .filter(|selector| selector.is_readable())
                    .is_some_and(|selector| selector.decode_index(question) == expected)
            })
        })
        .count() as f64;

    // Quizzes without `result_bands` band against the regular result catalog.
    let bands = if quiz.result_bands.is_empty() {
        &quiz.results
    } else {
        &quiz.result_bands
    };

    ScoredOutcome {
        outcome_type: Some(EngineKind::Mcq.label().to_string()),
        score: Some(correct),
        max: Some(quiz.questions.len() as f64),
        band: first_in_min_max(bands, correct).cloned(),
        tally: None,
        engine: EngineKind::Mcq,
    }
}
