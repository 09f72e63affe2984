/// Structural problems with a quiz document. Per-answer misses never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("quiz document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("quiz field `{field}` must be an array of questions, found {found}")]
    QuestionsNotIterable {
        field: &'static str,
        found: &'static str,
    },
    #[error("quiz document has no `questions` or `items` collection")]
    MissingQuestions,
    #[error("unsupported quiz type `{0}`")]
    UnsupportedQuizType(String),
}
