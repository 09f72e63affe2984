use super::common::*;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use crate::quiz::router::{quiz_handler, result_handler};
use crate::quiz::InMemoryOutcomeStore;

fn score_request(slug: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(format!("/api/v1/quizzes/{slug}/score"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn score_route_resolves_mbti_quiz() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(score_request(
            "love-type",
            json!({ "answers": { "q1": "a", "q2": "a", "q3": "a", "q4": "a" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("resolved"));
    assert_eq!(payload["outcome"]["type"], json!("ESTJ"));
    assert_eq!(payload["outcome"]["engine"], json!("mbti"));
    assert_eq!(payload["source"], json!("catalog"));
    assert_eq!(payload["result"]["title"], json!("The Organizer"));
    assert_eq!(payload["result"]["summary"], json!("Runs a tight ship"));
    assert_eq!(
        payload["share_url"],
        json!("https://quiz.test/love-type/result/ESTJ?share=1&r=ESTJ")
    );
}

#[tokio::test]
async fn score_route_finds_underscored_files() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(score_request(
            "stress-check",
            json!({ "answers": { "q1": "tense", "q2": "tense", "q3": "tense" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"]["score"], json!(9.0));
    assert_eq!(payload["result"]["id"], json!("high"));
}

#[tokio::test]
async fn score_route_tolerates_null_and_float_answers() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(score_request(
            "capitals",
            json!({ "answers": { "q1": 1.0, "q2": null, "q3": true } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"]["score"], json!(1.0));
    assert_eq!(payload["outcome"]["max"], json!(3.0));
    assert_eq!(payload["result"]["title"], json!("Tourist (1/3)"));
}

#[tokio::test]
async fn score_route_reports_structural_errors() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(score_request("broken", json!({ "answers": {} })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("questions"));
}

#[tokio::test]
async fn unknown_quiz_is_not_found() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(score_request("nope", json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_route_applies_search() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(
            Request::get("/api/v1/catalog?q=check")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["categories"][0], json!({ "name": "all", "count": 1 }));
}

#[tokio::test]
async fn quiz_handler_returns_normalized_quiz() {
    let dir = content_dir();
    let (service, _) = build_service(&dir);

    let response = quiz_handler::<InMemoryOutcomeStore>(
        State(Arc::new(service)),
        Path("capitals".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scoring"]["engine"], json!("mcq"));
    assert_eq!(payload["questions"][0]["options"][1]["id"], json!("b"));
}

#[tokio::test]
async fn quiz_handler_rejects_bad_slugs() {
    let dir = content_dir();
    let (service, _) = build_service(&dir);

    let response = quiz_handler::<InMemoryOutcomeStore>(
        State(Arc::new(service)),
        Path("bad.slug".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn result_handler_uses_query_type_and_builtin_table() {
    let dir = content_dir();
    let (service, _) = build_service(&dir);
    let query: HashMap<String, String> = [("r".to_string(), "enfp".to_string())].into();

    let response = result_handler::<InMemoryOutcomeStore>(
        State(Arc::new(service)),
        Path(("love-type".to_string(), "ESTJ".to_string())),
        Query(query),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["source"], json!("built_in_mbti"));
    assert_eq!(payload["result"]["id"], json!("ENFP"));
    assert!(payload.get("outcome").is_none());
}

#[tokio::test]
async fn result_route_reports_no_result() {
    let dir = content_dir();
    let response = router(&dir)
        .oneshot(
            Request::get("/api/v1/quizzes/love-type/result/unknown")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("no_result"));
    assert!(payload.get("result").is_none());
}

#[tokio::test]
async fn session_round_trip_reuses_the_stored_result() {
    let dir = content_dir();
    let router = router(&dir);

    let scored = router
        .clone()
        .oneshot(score_request(
            "grit",
            json!({ "answers": { "q1": 0, "q2": 1 }, "session_id": "visitor-1" }),
        ))
        .await
        .expect("route executes");
    let scored = read_json_body(scored).await;
    assert_eq!(scored["result"]["title"], json!("Building"));

    let revisit = router
        .oneshot(
            Request::get("/api/v1/quizzes/grit/result/likert?session_id=visitor-1")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let revisit = read_json_body(revisit).await;
    assert_eq!(revisit["source"], json!("prior"));
    assert_eq!(revisit["result"]["title"], json!("Building"));
    assert_eq!(revisit["outcome"]["score"], json!(1.0));
}
