use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::answers::Answers;
use super::engine::{self, ScoredOutcome};
use super::error::QuizError;
use super::normalizer::{normalize, NormalizedQuiz};
use super::results::{ResolutionSource, ResolvedResult, ResultResolver, ResultView};
use super::session::{OutcomeStore, SessionId, StoreError, StoredOutcome};
use super::share;
use crate::config::SiteConfig;
use crate::content::{CatalogListing, CatalogQuery, LibraryError, QuizLibrary};

/// Service composing the content library, the scoring core and session storage.
pub struct QuizService<S> {
    library: QuizLibrary,
    store: Arc<S>,
    site: SiteConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Resolved,
    NoResult,
}

/// Outcome of a scoring or deep-link request. `NoResult` is a normal answer,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ScoredOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ResolutionSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

impl ScoreReport {
    fn new(
        outcome: Option<ScoredOutcome>,
        resolved: Option<&ResolvedResult>,
        share_url: Option<String>,
    ) -> Self {
        Self {
            status: if resolved.is_some() {
                ReportStatus::Resolved
            } else {
                ReportStatus::NoResult
            },
            outcome,
            result: resolved.map(ResolvedResult::view),
            source: resolved.map(|resolved| resolved.source),
            share_url,
        }
    }
}

impl<S> QuizService<S>
where
    S: OutcomeStore + 'static,
{
    pub fn new(library: QuizLibrary, store: Arc<S>, site: SiteConfig) -> Self {
        Self {
            library,
            store,
            site,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn catalog(&self, query: &CatalogQuery) -> Result<CatalogListing, QuizServiceError> {
        Ok(self.library.catalog()?.search(query))
    }

    /// Canonical form of the quiz stored under `slug`.
    pub fn quiz(&self, slug: &str) -> Result<NormalizedQuiz, QuizServiceError> {
        let document = self.library.load(slug)?;
        Ok(normalize(&document)?)
    }

    /// Loads, scores and resolves `slug`, saving the run when a session is given.
    pub fn score(
        &self,
        slug: &str,
        answers: Answers,
        session: Option<&SessionId>,
    ) -> Result<ScoreReport, QuizServiceError> {
        let document = self.library.load(slug)?;
        self.score_document(slug, &document, answers, session)
    }

    /// Same as [`QuizService::score`] for a document already in hand.
    pub fn score_document(
        &self,
        slug: &str,
        document: &Value,
        answers: Answers,
        session: Option<&SessionId>,
    ) -> Result<ScoreReport, QuizServiceError> {
        let quiz = normalize(document)?;
        let outcome = engine::score(&quiz, &answers)?;
        let resolved = ResultResolver::new(&quiz.results).resolve(&outcome, None);

        if let Some(session) = session {
            self.store.save(
                session,
                StoredOutcome {
                    slug: slug.to_string(),
                    answers,
                    outcome: outcome.clone(),
                    result: resolved.as_ref().map(|resolved| resolved.spec.clone()),
                    saved_at: Utc::now(),
                },
            )?;
        }

        let share_url = outcome
            .outcome_type
            .as_deref()
            .and_then(|outcome_type| share::share_url(&self.site.origin, slug, outcome_type));

        Ok(ScoreReport::new(Some(outcome), resolved.as_ref(), share_url))
    }

    /// Resolves a result deep link. A stored run for the same quiz supplies
    /// the prior result when its type matches, and its answers are re-scored
    /// so band-based quizzes can still synthesize a result.
    pub fn result(
        &self,
        slug: &str,
        route_type: Option<&str>,
        query: &HashMap<String, String>,
        session: Option<&SessionId>,
    ) -> Result<ScoreReport, QuizServiceError> {
        let document = self.library.load(slug)?;
        let quiz = normalize(&document)?;

        let stored = match session {
            Some(session) => self.store.load(session, slug)?,
            None => None,
        };

        let target = share::detect_type(route_type, query).or_else(|| {
            stored
                .as_ref()
                .and_then(|stored| stored.outcome.outcome_type.clone())
        });
        let target = target.unwrap_or_default();

        let prior = stored
            .as_ref()
            .filter(|stored| {
                stored
                    .outcome
                    .outcome_type
                    .as_deref()
                    .is_some_and(|stored_type| stored_type.eq_ignore_ascii_case(&target))
            })
            .and_then(|stored| stored.result.as_ref());

        let outcome = match &stored {
            Some(stored) => Some(engine::score(&quiz, &stored.answers)?),
            None => None,
        };

        let resolved =
            ResultResolver::new(&quiz.results).resolve_type(&target, outcome.as_ref(), prior);
        if resolved.is_none() {
            debug!(slug, target = %target, "deep link has no displayable result");
        }

        let share_url = share::share_url(&self.site.origin, slug, &target);
        Ok(ScoreReport::new(outcome, resolved.as_ref(), share_url))
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QuizServiceError {
    /// HTTP status a caller should see for this failure.
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            Self::Library(LibraryError::InvalidSlug(_)) => StatusCode::BAD_REQUEST,
            Self::Library(LibraryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Quiz(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Library(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
