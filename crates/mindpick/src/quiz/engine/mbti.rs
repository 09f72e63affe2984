use super::{EngineKind, ScoredOutcome};
use crate::quiz::answers::Answers;
use crate::quiz::normalizer::{NormalizedQuiz, QuizOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MbtiLetter {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl MbtiLetter {
    /// Axis pairs in code order; the first letter of each pair wins ties.
    pub const AXES: [(Self, Self); 4] = [
        (Self::E, Self::I),
        (Self::S, Self::N),
        (Self::T, Self::F),
        (Self::J, Self::P),
    ];

    /// Exact, case-sensitive letter lookup.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "E" => Some(Self::E),
            "I" => Some(Self::I),
            "S" => Some(Self::S),
            "N" => Some(Self::N),
            "T" => Some(Self::T),
            "F" => Some(Self::F),
            "J" => Some(Self::J),
            "P" => Some(Self::P),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::E => 'E',
            Self::I => 'I',
            Self::S => 'S',
            Self::N => 'N',
            Self::T => 'T',
            Self::F => 'F',
            Self::J => 'J',
            Self::P => 'P',
        }
    }
}

/// Per-letter counters. Values are immutable; every update returns a new tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MbtiTally {
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "J")]
    pub j: f64,
    #[serde(rename = "P")]
    pub p: f64,
}

impl MbtiTally {
    pub fn get(&self, letter: MbtiLetter) -> f64 {
        match letter {
            MbtiLetter::E => self.e,
            MbtiLetter::I => self.i,
            MbtiLetter::S => self.s,
            MbtiLetter::N => self.n,
            MbtiLetter::T => self.t,
            MbtiLetter::F => self.f,
            MbtiLetter::J => self.j,
            MbtiLetter::P => self.p,
        }
    }

    #[must_use]
    pub fn with_added(self, letter: MbtiLetter, amount: f64) -> Self {
        let mut next = self;
        let slot = match letter {
            MbtiLetter::E => &mut next.e,
            MbtiLetter::I => &mut next.i,
            MbtiLetter::S => &mut next.s,
            MbtiLetter::N => &mut next.n,
            MbtiLetter::T => &mut next.t,
            MbtiLetter::F => &mut next.f,
            MbtiLetter::J => &mut next.j,
            MbtiLetter::P => &mut next.p,
        };
        *slot += amount;
        next
    }

    /// Applies one option's contribution; keys outside the eight letters are ignored.
    #[must_use]
    pub fn apply(self, contribution: &Contribution) -> Self {
        match contribution {
            Contribution::Letter(key) => match MbtiLetter::parse(key) {
                Some(letter) => self.with_added(letter, 1.0),
                None => self,
            },
            Contribution::Weighted(entries) => {
                entries.iter().fold(self, |tally, (key, amount)| {
                    match MbtiLetter::parse(key) {
                        Some(letter) => tally.with_added(letter, *amount),
                        None => tally,
                    }
                })
            }
        }
    }

    /// Four-letter code; `>=` per axis so ties go to E, S, T and J.
    pub fn type_code(&self) -> String {
        MbtiLetter::AXES
            .iter()
            .map(|(first, second)| {
                if self.get(*first) >= self.get(*second) {
                    first.as_char()
                } else {
                    second.as_char()
                }
            })
            .collect()
    }
}

/// What a chosen option adds to the tally.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    Letter(String),
    Weighted(Vec<(String, f64)>),
}

type ContributionExtractor = fn(&QuizOption) -> Option<Contribution>;

/// Checked in order; the first field present on an option is the only one applied.
pub const CONTRIBUTION_EXTRACTORS: [(&str, ContributionExtractor); 5] = [
    ("mbti", from_mbti_field),
    ("dim", from_dim_field),
    ("axis+choice", from_axis_choice),
    ("score_map", from_score_map),
    ("code", from_code_field),
];

fn from_mbti_field(option: &QuizOption) -> Option<Contribution> {
    option.mbti.clone().map(Contribution::Letter)
}

fn from_dim_field(option: &QuizOption) -> Option<Contribution> {
    option.dim.clone().map(Contribution::Letter)
}

fn from_axis_choice(option: &QuizOption) -> Option<Contribution> {
    option.axis.as_ref()?;
    option.choice.clone().map(Contribution::Letter)
}

fn from_score_map(option: &QuizOption) -> Option<Contribution> {
    option.score_map.as_ref().map(|map| {
        Contribution::Weighted(
            map.iter()
                .map(|(key, amount)| (key.clone(), *amount))
                .collect(),
        )
    })
}

fn from_code_field(option: &QuizOption) -> Option<Contribution> {
    option.code.clone().map(Contribution::Letter)
}

pub fn contribution(option: &QuizOption) -> Option<Contribution> {
    CONTRIBUTION_EXTRACTORS
        .iter()
        .find_map(|(_, extract)| extract(option))
}

pub(super) fn score(quiz: &NormalizedQuiz, answers: &Answers) -> ScoredOutcome {
    let tally = quiz
        .questions
        .iter()
        .filter_map(|question| answers.chosen_option(question))
        .filter_map(contribution)
        .fold(MbtiTally::default(), |tally, contribution| {
            tally.apply(&contribution)
        });

    ScoredOutcome {
        outcome_type: Some(tally.type_code()),
        score: None,
        max: None,
        band: None,
        tally: Some(tally),
        engine: EngineKind::Mbti,
    }
}
