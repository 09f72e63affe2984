use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{ContentConfig, SiteConfig};
use crate::content::QuizLibrary;
use crate::quiz::{quiz_router, InMemoryOutcomeStore, QuizService};

pub(super) const ORIGIN: &str = "https://quiz.test";

/// One question per axis, first option on the E/S/T/J side.
pub(super) fn mbti_quiz() -> Value {
    json!({
        "id": "love-type",
        "title": "Love Type",
        "questions": [
            { "id": "q1", "options": [{ "id": "a", "mbti": "E" }, { "id": "b", "mbti": "I" }] },
            { "id": "q2", "options": [{ "id": "a", "mbti": "S" }, { "id": "b", "mbti": "N" }] },
            { "id": "q3", "options": [{ "id": "a", "mbti": "T" }, { "id": "b", "mbti": "F" }] },
            { "id": "q4", "options": [{ "id": "a", "mbti": "J" }, { "id": "b", "mbti": "P" }] }
        ],
        "results": {
            "ESTJ": { "title": "The Organizer", "summary": "Runs a tight ship" },
            "infp": { "title": "The Dreamer" }
        }
    })
}

/// Three questions scored 1 (`calm`) or 3 (`tense`).
pub(super) fn sum_range_quiz() -> Value {
    let questions: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "id": format!("q{n}"),
                "options": [{ "id": "calm", "score": 1 }, { "id": "tense", "score": 3 }]
            })
        })
        .collect();

    json!({
        "id": "stress-check",
        "scoring": { "engine": "sum-range" },
        "questions": questions,
        "results": [
            { "id": "low", "range": [0, 4], "label": "Relaxed" },
            { "id": "high", "range": [5, 9], "label": "Stressed" }
        ]
    })
}

pub(super) fn likert_quiz() -> Value {
    json!({
        "id": "grit",
        "type": "likert",
        "scoring": { "option_scores": [0, 1, 2, 3, 4] },
        "questions": [
            { "id": "q1", "options": ["never", "rarely", "sometimes", "often", "always"] },
            { "id": "q2", "options": ["never", "rarely", "sometimes", "often", "always"] }
        ],
        "results": [
            { "label": "Building", "range": [0, 3], "desc": "Keep practicing." },
            { "label": "Gritty", "range": [4, 8], "desc": "You stick with it." }
        ]
    })
}

pub(super) fn mcq_quiz() -> Value {
    json!({
        "id": "capitals",
        "type": "mcq",
        "questions": [
            { "id": "q1", "correct_index": 1, "options": ["Lyon", "Paris", "Nice"] },
            { "id": "q2", "correct_index": 0, "options": ["Seoul", "Busan"] },
            { "id": "q3", "correct_index": 2, "options": ["Sydney", "Perth", "Canberra"] }
        ],
        "result_bands": [
            { "label": "Tourist", "min": 0, "max": 1 },
            { "label": "Traveller", "min": 2, "max": 2 },
            { "label": "Geographer", "min": 3, "desc": "Perfect score." }
        ]
    })
}

pub(super) fn write_quiz(root: &Path, slug: &str, document: &Value) {
    let dir = root.join("quizzes");
    fs::create_dir_all(&dir).expect("create quizzes dir");
    fs::write(dir.join(format!("{slug}.json")), document.to_string()).expect("write quiz");
}

/// Content directory holding every fixture quiz plus a small catalog.
pub(super) fn content_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_quiz(dir.path(), "love-type", &mbti_quiz());
    write_quiz(dir.path(), "stress_check", &sum_range_quiz());
    write_quiz(dir.path(), "grit", &likert_quiz());
    write_quiz(dir.path(), "capitals", &mcq_quiz());
    write_quiz(dir.path(), "broken", &json!({ "id": "broken", "questions": 7 }));
    fs::write(
        dir.path().join("catalog.json"),
        json!({
            "items": [
                { "slug": "love-type", "title": "Love Type", "category": "love" },
                { "slug": "stress-check", "title": "Stress Check", "category": "health" },
                { "slug": "grit", "title": "Grit Scale" }
            ]
        })
        .to_string(),
    )
    .expect("write catalog");
    dir
}

pub(super) fn build_service(
    dir: &TempDir,
) -> (QuizService<InMemoryOutcomeStore>, Arc<InMemoryOutcomeStore>) {
    let store = Arc::new(InMemoryOutcomeStore::new());
    let library = QuizLibrary::new(&ContentConfig {
        root: dir.path().to_path_buf(),
    });
    let service = QuizService::new(library, store.clone(), SiteConfig::new(ORIGIN));
    (service, store)
}

pub(super) fn router(dir: &TempDir) -> axum::Router {
    let (service, _) = build_service(dir);
    quiz_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
