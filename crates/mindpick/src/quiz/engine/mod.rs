//! Scoring engines. Selection is driven by the quiz `type` and `scoring.engine`.

mod bands;
mod likert;
pub mod mbti;
mod mcq;
mod sum_range;

pub use mbti::{Contribution, MbtiLetter, MbtiTally};

use super::answers::Answers;
use super::error::QuizError;
use super::normalizer::{normalize, NormalizedQuiz};
use super::results::ResultSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    Mbti,
    SumRange,
    Likert,
    Mcq,
    External,
}

impl EngineKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mbti => "mbti",
            Self::SumRange => "sum-range",
            Self::Likert => "likert",
            Self::Mcq => "mcq",
            Self::External => "external",
        }
    }

    /// Engines that pick a numeric band out of the result catalog.
    pub const fn uses_bands(self) -> bool {
        matches!(self, Self::SumRange | Self::Likert | Self::Mcq)
    }
}

/// Engine output. `type` is the discriminant used to look up a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutcome {
    #[serde(rename = "type")]
    pub outcome_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<ResultSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tally: Option<MbtiTally>,
    pub engine: EngineKind,
}

impl ScoredOutcome {
    pub(crate) fn external() -> Self {
        Self {
            outcome_type: Some(EngineKind::External.label().to_string()),
            score: Some(0.0),
            max: Some(0.0),
            band: None,
            tally: None,
            engine: EngineKind::External,
        }
    }
}

/// Picks the engine for `quiz`. An unknown explicit `type` is an error.
pub fn select_engine(quiz: &NormalizedQuiz) -> Result<EngineKind, QuizError> {
    match quiz.quiz_type.as_deref() {
        Some("likert") => return Ok(EngineKind::Likert),
        Some("mcq") => return Ok(EngineKind::Mcq),
        None | Some("external") | Some("mbti") => {}
        Some(other) => return Err(QuizError::UnsupportedQuizType(other.to_string())),
    }

    if quiz.scoring.engine == EngineKind::SumRange.label() {
        return Ok(EngineKind::SumRange);
    }

    if quiz.quiz_type.as_deref() == Some("external") {
        return Ok(EngineKind::External);
    }

    Ok(EngineKind::Mbti)
}

/// Scores a normalized quiz. Unanswered or unmatched answers contribute nothing;
/// only structural problems with the quiz itself are errors.
pub fn score(quiz: &NormalizedQuiz, answers: &Answers) -> Result<ScoredOutcome, QuizError> {
    if quiz.question_source.is_none() {
        return Err(QuizError::MissingQuestions);
    }

    let engine = select_engine(quiz)?;
    debug!(
        engine = engine.label(),
        questions = quiz.questions.len(),
        answered = answers.len(),
        "scoring quiz"
    );

    let outcome = match engine {
        EngineKind::Mbti => mbti::score(quiz, answers),
        EngineKind::SumRange => sum_range::score(quiz, answers),
        EngineKind::Likert => likert::score(quiz, answers),
        EngineKind::Mcq => mcq::score(quiz, answers),
        EngineKind::External => ScoredOutcome::external(),
    };

    if outcome.outcome_type.is_none() {
        debug!(engine = engine.label(), "scoring produced no outcome type");
    }

    Ok(outcome)
}

/// Normalizes and scores a raw quiz document in one step.
pub fn score_document(document: &Value, answers: &Answers) -> Result<ScoredOutcome, QuizError> {
    let quiz = normalize(document)?;
    score(&quiz, answers)
}
