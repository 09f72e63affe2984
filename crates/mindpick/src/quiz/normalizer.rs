use super::document::{
    as_integral, as_number, first_array, first_present, json_kind, scalar_text, string_field, truthy_text,
};
use super::error::QuizError;
use super::results::{catalog, ResultSpec};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const QUESTION_KEYS: [(&str, QuestionSource); 2] = [
    ("questions", QuestionSource::Questions),
    ("items", QuestionSource::Items),
];
const OPTION_KEYS: [&str; 3] = ["options", "choices", "answers"];
const QUESTION_TITLE_KEYS: [&str; 3] = ["title", "question", "text"];
const OPTION_ID_KEYS: [&str; 2] = ["id", "value"];
const OPTION_LABEL_KEYS: [&str; 5] = ["label", "text", "title", "content", "name"];
const OPTION_SCORE_KEYS: [&str; 2] = ["score", "points"];

/// Which document field supplied the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Questions,
    Items,
}

/// Canonical option with every scoring-relevant field lifted out of the raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOption {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbti: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_map: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub options: Vec<QuizOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<i64>,
}

impl Question {
    pub fn option_by_id(&self, id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.options.iter().position(|option| option.id == id)
    }

    pub fn option_at(&self, index: i64) -> Option<&QuizOption> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.options.get(index))
    }
}

/// Scoring block; `engine` is always populated after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoring {
    pub engine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_scores: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Quiz with canonical questions and scoring. Serializes as the original
/// document with `questions` and `scoring` replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuiz {
    #[serde(skip)]
    pub quiz_type: Option<String>,
    #[serde(skip)]
    pub question_source: Option<QuestionSource>,
    #[serde(skip)]
    pub results: Vec<ResultSpec>,
    #[serde(skip)]
    pub result_bands: Vec<ResultSpec>,
    pub questions: Vec<Question>,
    pub scoring: Scoring,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NormalizedQuiz {
    /// Quiz identifier from `id`, falling back to `slug`.
    pub fn slug(&self) -> Option<String> {
        first_present(&self.fields, &["id", "slug"]).and_then(scalar_text)
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }
}

/// Builds the canonical quiz. Missing collections become empty; only a
/// non-object document or a non-array question field is rejected.
pub fn normalize(document: &Value) -> Result<NormalizedQuiz, QuizError> {
    let object = document.as_object().ok_or(QuizError::NotAnObject {
        found: json_kind(document),
    })?;

    let (question_source, raw_questions) = question_list(object)?;
    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_question(index, raw))
        .collect();

    let quiz_type = object
        .get("type")
        .filter(|value| !value.is_null())
        .and_then(|value| match value {
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        });

    let scoring = normalize_scoring(object, quiz_type.as_deref());
    let results = catalog::normalize_catalog(object);
    let result_bands = catalog::result_bands(object);

    let fields = without_keys(object, &["questions", "scoring"]);

    Ok(NormalizedQuiz {
        quiz_type,
        question_source,
        results,
        result_bands,
        questions,
        scoring,
        fields,
    })
}

fn question_list(
    object: &Map<String, Value>,
) -> Result<(Option<QuestionSource>, &[Value]), QuizError> {
    if let Some((source, list)) = QUESTION_KEYS.iter().find_map(|(key, source)| {
        object
            .get(*key)
            .and_then(Value::as_array)
            .map(|list| (*source, list))
    }) {
        return Ok((Some(source), list.as_slice()));
    }

    match QUESTION_KEYS.iter().find_map(|(key, _)| {
        object
            .get(*key)
            .filter(|value| !value.is_null())
            .map(|value| (*key, value))
    }) {
        Some((field, value)) => Err(QuizError::QuestionsNotIterable {
            field,
            found: json_kind(value),
        }),
        None => Ok((None, &[][..])),
    }
}

fn normalize_question(index: usize, raw: &Value) -> Question {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    let id = first_present(object, &["id"])
        .and_then(scalar_text)
        .unwrap_or_else(|| format!("q{}", index + 1));
    let title = first_present(object, &QUESTION_TITLE_KEYS)
        .and_then(scalar_text)
        .unwrap_or_else(|| format!("Question {}", index + 1));
    let options = first_array(object, &OPTION_KEYS)
        .map(|list| {
            list.iter()
                .enumerate()
                .map(|(position, raw)| normalize_option(position, raw))
                .collect()
        })
        .unwrap_or_default();
    let correct_index = object.get("correct_index").and_then(as_integral);

    Question {
        id,
        title,
        options,
        correct_index,
    }
}

fn normalize_option(position: usize, raw: &Value) -> QuizOption {
    let Some(object) = raw.as_object() else {
        return QuizOption {
            id: positional_option_id(position),
            label: scalar_text(raw).unwrap_or_default(),
            score: None,
            mbti: None,
            dim: None,
            axis: None,
            choice: None,
            score_map: None,
            code: None,
        };
    };

    let score_map = object.get("score_map").and_then(Value::as_object).map(|map| {
        map.iter()
            .filter_map(|(key, value)| as_number(value).map(|amount| (key.clone(), amount)))
            .collect()
    });

    QuizOption {
        id: first_present(object, &OPTION_ID_KEYS)
            .and_then(scalar_text)
            .unwrap_or_else(|| positional_option_id(position)),
        label: first_present(object, &OPTION_LABEL_KEYS)
            .and_then(scalar_text)
            .unwrap_or_default(),
        score: first_present(object, &OPTION_SCORE_KEYS).and_then(as_number),
        mbti: string_field(object, "mbti"),
        dim: string_field(object, "dim"),
        axis: object.get("axis").and_then(truthy_text),
        choice: object.get("choice").and_then(truthy_text),
        score_map,
        code: string_field(object, "code"),
    }
}

/// `a`, `b`, `c`, … by zero-based position.
fn positional_option_id(position: usize) -> String {
    u32::try_from(position)
        .ok()
        .and_then(|offset| char::from_u32(u32::from(b'a') + offset))
        .map(String::from)
        .unwrap_or_else(|| format!("o{}", position + 1))
}

fn normalize_scoring(object: &Map<String, Value>, quiz_type: Option<&str>) -> Scoring {
    let empty = Map::new();
    let declared_scoring = object
        .get("scoring")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let declared = declared_scoring
        .get("engine")
        .and_then(truthy_text)
        .or_else(|| object.get("engine").and_then(truthy_text));
    let engine = declared.unwrap_or_else(|| match quiz_type {
        Some("likert") => "likert".to_string(),
        Some("mcq") => "mcq".to_string(),
        _ => "mbti".to_string(),
    });

    let option_scores = declared_scoring
        .get("option_scores")
        .and_then(Value::as_array)
        .map(|scores| {
            scores
                .iter()
                .map(|score| as_number(score).unwrap_or(0.0))
                .collect()
        });

    Scoring {
        engine,
        option_scores,
        extra: without_keys(declared_scoring, &["engine", "option_scores"]),
    }
}

/// Copy of `object` without `keys`, keeping the remaining field order.
fn without_keys(object: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn synthesizes_positional_ids() {
        let quiz = normalize(&json!({
            "questions": [
                { "title": "First", "options": [{ "label": "Yes" }, { "label": "No" }] },
                { "id": "custom", "choices": [{ "value": "x" }, { "text": "Other" }] }
            ]
        }))
        .expect("normalizes");

        assert_eq!(quiz.questions[0].id, "q1");
        assert_eq!(quiz.questions[1].id, "custom");
        let first_ids: Vec<&str> = quiz.questions[0]
            .options
            .iter()
            .map(|option| option.id.as_str())
            .collect();
        assert_eq!(first_ids, ["a", "b"]);
        assert_eq!(quiz.questions[1].options[0].id, "x");
        assert_eq!(quiz.questions[1].options[1].id, "b");
        assert_eq!(quiz.questions[1].options[1].label, "Other");
    }

    #[test]
    fn falls_back_to_items_and_answers_synonyms() {
        let quiz = normalize(&json!({
            "items": [{ "question": "Pick", "answers": [{ "id": 1, "points": "3" }] }]
        }))
        .expect("normalizes");

        assert_eq!(quiz.question_source, Some(QuestionSource::Items));
        assert_eq!(quiz.questions[0].title, "Pick");
        assert_eq!(quiz.questions[0].options[0].id, "1");
        assert_eq!(quiz.questions[0].options[0].score, Some(3.0));
    }

    #[test]
    fn missing_collections_normalize_to_empty() {
        let quiz = normalize(&json!({ "id": "empty" })).expect("normalizes");
        assert!(quiz.questions.is_empty());
        assert_eq!(quiz.question_source, None);
        assert_eq!(quiz.scoring.engine, "mbti");
        assert_eq!(quiz.slug().as_deref(), Some("empty"));
    }

    #[test]
    fn rejects_non_object_documents() {
        let error = normalize(&json!([1, 2, 3])).expect_err("array is not a quiz");
        assert_eq!(error, QuizError::NotAnObject { found: "array" });
    }

    #[test]
    fn rejects_non_array_questions() {
        let error = normalize(&json!({ "questions": 5 })).expect_err("number is not iterable");
        assert_eq!(
            error,
            QuizError::QuestionsNotIterable {
                field: "questions",
                found: "number"
            }
        );
    }

    #[test]
    fn items_rescue_a_malformed_questions_field() {
        let quiz = normalize(&json!({ "questions": "oops", "items": [{}] })).expect("normalizes");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.question_source, Some(QuestionSource::Items));
    }

    #[test]
    fn scoring_engine_is_always_populated() {
        let legacy = normalize(&json!({ "engine": "sum-range", "questions": [] })).expect("ok");
        assert_eq!(legacy.scoring.engine, "sum-range");

        let likert = normalize(&json!({
            "type": "likert",
            "scoring": { "option_scores": [0, 1, 2], "note": "kept" },
            "questions": []
        }))
        .expect("ok");
        assert_eq!(likert.scoring.engine, "likert");
        assert_eq!(likert.scoring.option_scores, Some(vec![0.0, 1.0, 2.0]));
        assert_eq!(likert.scoring.extra.get("note"), Some(&json!("kept")));
    }

    #[test]
    fn serialized_form_preserves_top_level_fields() {
        let quiz = normalize(&json!({
            "id": "love-type",
            "title": "Love type",
            "questions": [{ "options": [{ "mbti": "E" }] }],
            "results": { "ENTJ": { "title": "Commander" } }
        }))
        .expect("normalizes");

        let rendered = serde_json::to_value(&quiz).expect("serializes");
        assert_eq!(rendered["title"], json!("Love type"));
        assert_eq!(rendered["questions"][0]["id"], json!("q1"));
        assert_eq!(rendered["questions"][0]["options"][0]["id"], json!("a"));
        assert_eq!(rendered["scoring"]["engine"], json!("mbti"));
        assert_eq!(rendered["results"]["ENTJ"]["title"], json!("Commander"));
    }

    #[test]
    fn option_contribution_fields_stay_separate() {
        let quiz = normalize(&json!({
            "questions": [{ "options": [
                { "code": "I", "axis": "EI", "choice": "E", "score_map": { "N": 2, "S": "x" } }
            ]}]
        }))
        .expect("normalizes");
        let option = &quiz.questions[0].options[0];
        assert_eq!(option.code.as_deref(), Some("I"));
        assert_eq!(option.mbti, None);
        assert_eq!(option.axis.as_deref(), Some("EI"));
        assert_eq!(option.choice.as_deref(), Some("E"));
        let score_map = option.score_map.as_ref().expect("score map kept");
        assert_eq!(score_map.get("N"), Some(&2.0));
        assert!(!score_map.contains_key("S"));
    }
}
