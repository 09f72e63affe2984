use super::document::as_integral;
use super::normalizer::{Question, QuizOption};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A user's pick for one question: an option id, a letter, or a position.
/// Values that are neither (booleans, fractions, lists) are kept as
/// `Unreadable` and score like an unanswered question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AnswerSelector {
    Index(i64),
    Text(String),
    Unreadable,
}

impl AnswerSelector {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            other => as_integral(other).map_or(Self::Unreadable, Self::Index),
        }
    }

    pub fn is_readable(&self) -> bool {
        !matches!(self, AnswerSelector::Unreadable)
    }

    /// Option whose canonical id equals this selector.
    pub fn matching_option<'q>(&self, question: &'q Question) -> Option<&'q QuizOption> {
        match self {
            AnswerSelector::Text(id) => question.option_by_id(id),
            AnswerSelector::Index(index) => question.option_by_id(&index.to_string()),
            AnswerSelector::Unreadable => None,
        }
    }

    /// Zero-based option position: integer as-is, then exact id, then a single
    /// letter (`a` is 0), then a leading integer, else 0.
    pub fn decode_index(&self, question: &Question) -> i64 {
        let text = match self {
            AnswerSelector::Index(index) => return *index,
            AnswerSelector::Text(text) => text,
            AnswerSelector::Unreadable => return 0,
        };

        if let Some(position) = question.position_of(text) {
            return position as i64;
        }

        if let [letter] = text.as_bytes() {
            if letter.is_ascii_alphabetic() {
                return i64::from(letter.to_ascii_lowercase() - b'a');
            }
        }

        leading_integer(text).unwrap_or(0)
    }
}

impl From<&str> for AnswerSelector {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerSelector {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AnswerSelector {
    fn from(value: i64) -> Self {
        Self::Index(value)
    }
}

impl From<i32> for AnswerSelector {
    fn from(value: i32) -> Self {
        Self::Index(i64::from(value))
    }
}

impl<'de> Deserialize<'de> for AnswerSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_json(&Value::deserialize(deserializer)?))
    }
}

/// Answers keyed by normalized question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, AnswerSelector>);

/// `null` entries are dropped; every other value is kept as a selector.
impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(question, value)| {
                    let selector = AnswerSelector::from_json(&value);
                    (question, selector)
                })
                .collect(),
        ))
    }
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, question_id: impl Into<String>, selector: impl Into<AnswerSelector>) -> Self {
        self.insert(question_id, selector);
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, selector: impl Into<AnswerSelector>) {
        self.0.insert(question_id.into(), selector.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerSelector> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerSelector)> {
        self.0.iter()
    }

    /// Option picked for `question`, matched by id.
    pub(crate) fn chosen_option<'q>(&self, question: &'q Question) -> Option<&'q QuizOption> {
        self.get(&question.id)
            .and_then(|selector| selector.matching_option(question))
    }

    /// Decoded option position for `question`; unanswered questions read as 0.
    pub(crate) fn selected_index(&self, question: &Question) -> i64 {
        self.get(&question.id)
            .map(|selector| selector.decode_index(question))
            .unwrap_or(0)
    }
}

impl<K, V> FromIterator<(K, V)> for Answers
where
    K: Into<String>,
    V: Into<AnswerSelector>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}
