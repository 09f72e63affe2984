use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::answers::Answers;
use super::service::{QuizService, QuizServiceError};
use super::session::{OutcomeStore, SessionId};
use crate::content::CatalogQuery;

/// Body of a scoring request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Router builder exposing catalog, quiz, scoring and result endpoints.
pub fn quiz_router<S>(service: Arc<QuizService<S>>) -> Router
where
    S: OutcomeStore + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/quizzes/:slug", get(quiz_handler::<S>))
        .route("/api/v1/quizzes/:slug/score", post(score_handler::<S>))
        .route(
            "/api/v1/quizzes/:slug/result/:result_type",
            get(result_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Query(query): Query<CatalogQuery>,
) -> Response
where
    S: OutcomeStore + 'static,
{
    match service.catalog(&query) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quiz_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path(slug): Path<String>,
) -> Response
where
    S: OutcomeStore + 'static,
{
    match service.quiz(&slug) {
        Ok(quiz) => (StatusCode::OK, axum::Json(quiz)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path(slug): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: OutcomeStore + 'static,
{
    let session = session_id(request.session_id);
    match service.score(&slug, request.answers, session.as_ref()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<S>(
    State(service): State<Arc<QuizService<S>>>,
    Path((slug, result_type)): Path<(String, String)>,
    Query(mut query): Query<HashMap<String, String>>,
) -> Response
where
    S: OutcomeStore + 'static,
{
    let session = session_id(query.remove("session_id"));
    match service.result(&slug, Some(&result_type), &query, session.as_ref()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn session_id(raw: Option<String>) -> Option<SessionId> {
    raw.filter(|id| !id.trim().is_empty()).map(SessionId)
}

fn error_response(error: QuizServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}
