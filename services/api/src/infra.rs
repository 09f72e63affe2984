use metrics_exporter_prometheus::PrometheusHandle;
use mindpick::config::{ContentConfig, SiteConfig};
use mindpick::content::QuizLibrary;
use mindpick::error::AppError;
use mindpick::quiz::{AnswerSelector, Answers, InMemoryOutcomeStore, QuizService};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_quiz_service(
    content: &ContentConfig,
    site: &SiteConfig,
) -> Arc<QuizService<InMemoryOutcomeStore>> {
    Arc::new(QuizService::new(
        QuizLibrary::new(content),
        Arc::new(InMemoryOutcomeStore::new()),
        site.clone(),
    ))
}

/// `question=selector`; integer selectors are read as option positions.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, AnswerSelector), String> {
    let (question, selector) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=ANSWER, got '{raw}'"))?;
    let question = question.trim();
    let selector = selector.trim();
    if question.is_empty() || selector.is_empty() {
        return Err(format!("expected QUESTION=ANSWER, got '{raw}'"));
    }

    let selector = match selector.parse::<i64>() {
        Ok(index) => AnswerSelector::Index(index),
        Err(_) => AnswerSelector::Text(selector.to_string()),
    };
    Ok((question.to_string(), selector))
}

/// Answers from a JSON object file such as `{ "q1": "a", "q2": 3 }`.
pub(crate) fn load_answers(path: &Path) -> Result<Answers, AppError> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid answers file {}: {err}", path.display()),
        ))
    })
}
