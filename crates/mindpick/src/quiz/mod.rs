//! Quiz scoring core: normalization, engines and result resolution, plus the
//! service and HTTP router that expose them.

mod answers;
mod document;
pub mod engine;
mod error;
mod normalizer;
pub mod results;
mod router;
mod service;
pub mod session;
pub mod share;

#[cfg(test)]
mod tests;

pub use answers::{AnswerSelector, Answers};
pub use engine::{score, score_document, select_engine, EngineKind, MbtiTally, ScoredOutcome};
pub use error::QuizError;
pub use normalizer::{normalize, NormalizedQuiz, Question, QuestionSource, QuizOption, Scoring};
pub use results::{ResolutionSource, ResolvedResult, ResultResolver, ResultSpec, ResultView};
pub use router::{quiz_router, ScoreRequest};
pub use service::{QuizService, QuizServiceError, ReportStatus, ScoreReport};
pub use session::{InMemoryOutcomeStore, OutcomeStore, SessionId, StoreError, StoredOutcome};
