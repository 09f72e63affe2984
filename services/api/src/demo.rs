use crate::infra::{build_quiz_service, load_answers, parse_answer};
use clap::Args;
use mindpick::config::{AppConfig, ContentConfig, SiteConfig};
use mindpick::error::AppError;
use mindpick::quiz::{AnswerSelector, Answers, ReportStatus, ScoreReport, SessionId};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Quiz slug; dashes and underscores are interchangeable
    #[arg(long)]
    pub(crate) slug: String,
    /// JSON file with an object of question id to answer
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Single answer as QUESTION=ANSWER; repeat for more questions
    #[arg(long, value_parser = parse_answer)]
    pub(crate) answer: Vec<(String, AnswerSelector)>,
    /// Override the directory holding `quizzes/` and `catalog.json`
    #[arg(long)]
    pub(crate) content_dir: Option<PathBuf>,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        slug,
        answers,
        answer,
        content_dir,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(content_dir) = content_dir {
        config.content.root = content_dir;
    }

    let mut collected = match answers {
        Some(path) => load_answers(&path)?,
        None => Answers::new(),
    };
    for (question, selector) in answer {
        collected.insert(question, selector);
    }

    let service = build_quiz_service(&config.content, &config.site);
    let report = service.score(&slug, collected, None)?;

    if json {
        print_json(&report);
    } else {
        render_report(&slug, &report);
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    // Built-in documents never touch the content directory.
    let service = build_quiz_service(
        &ContentConfig {
            root: PathBuf::from("public"),
        },
        &SiteConfig::default(),
    );
    let session = SessionId::new("demo");

    println!("MindPick scoring demo");

    let personality = personality_quiz();
    let answers = Answers::new()
        .with("q1", "a")
        .with("q2", "b")
        .with("q3", "a")
        .with("q4", "b");
    println!("\nMBTI quiz (answers: E, N, T, P)");
    let report = service.score_document("weekend-type", &personality, answers, Some(&session))?;
    render_report("weekend-type", &report);

    let stress = stress_quiz();
    let answers = Answers::new()
        .with("q1", "c")
        .with("q2", "b")
        .with("q3", "c");
    println!("\nSum-range quiz (answers: c, b, c)");
    let report = service.score_document("stress-check", &stress, answers, Some(&session))?;
    render_report("stress-check", &report);

    Ok(())
}

fn render_report(slug: &str, report: &ScoreReport) {
    println!("  Quiz: {slug}");
    if let Some(outcome) = &report.outcome {
        println!("  Engine: {}", outcome.engine.label());
        println!(
            "  Type: {}",
            outcome.outcome_type.as_deref().unwrap_or("(none)")
        );
        if let (Some(score), Some(max)) = (outcome.score, outcome.max) {
            println!("  Score: {score} / {max}");
        } else if let Some(score) = outcome.score {
            println!("  Score: {score}");
        }
    }

    match (&report.status, &report.result) {
        (ReportStatus::Resolved, Some(view)) => {
            let title = view
                .fields
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)");
            println!("  Result: {title}");
            if let Some(source) = &report.source {
                println!("  Resolved from: {source:?}");
            }
            if !view.summary.is_empty() {
                println!("  Summary: {}", view.summary);
            }
            for strength in &view.strengths {
                println!("    + {strength}");
            }
            for caution in &view.cautions {
                println!("    - {caution}");
            }
        }
        _ => println!("  No displayable result for this outcome"),
    }

    if let Some(url) = &report.share_url {
        println!("  Share: {url}");
    }
}

fn print_json(report: &ScoreReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("unable to render report: {err}"),
    }
}

fn personality_quiz() -> Value {
    json!({
        "id": "weekend-type",
        "title": "What does your weekend say about you?",
        "questions": [
            { "text": "Saturday night plans?", "options": [
                { "id": "a", "label": "Big party", "mbti": "E" },
                { "id": "b", "label": "Movie at home", "mbti": "I" }
            ]},
            { "text": "Picking a trip", "options": [
                { "id": "a", "label": "Proven favourite", "mbti": "S" },
                { "id": "b", "label": "Somewhere unknown", "mbti": "N" }
            ]},
            { "text": "A friend asks for advice", "options": [
                { "id": "a", "label": "Lay out the options", "mbti": "T" },
                { "id": "b", "label": "Listen first", "mbti": "F" }
            ]},
            { "text": "Sunday schedule", "options": [
                { "id": "a", "label": "Planned by the hour", "mbti": "J" },
                { "id": "b", "label": "See what happens", "mbti": "P" }
            ]}
        ],
        "results": {
            "ENTP": {
                "title": "The Weekend Inventor",
                "summary": "Every free day becomes an experiment.",
                "strengths": "Quick ideas\nEasy company",
                "cautions": ["Half-finished projects"]
            }
        }
    })
}

fn stress_quiz() -> Value {
    json!({
        "id": "stress-check",
        "scoring": { "engine": "sum-range" },
        "questions": [
            { "text": "Sleep lately", "options": [{ "score": 0 }, { "score": 1 }, { "score": 2 }] },
            { "text": "Mood swings", "options": [{ "score": 0 }, { "score": 1 }, { "score": 2 }] },
            { "text": "Focus at work", "options": [{ "score": 0 }, { "score": 1 }, { "score": 2 }] }
        ],
        "results": [
            { "id": "calm", "range": [0, 2], "title": "Calm waters", "summary": "Keep your routines." },
            { "id": "tense", "range": [3, 4], "title": "Some pressure", "summary": "Schedule real breaks." },
            { "id": "overloaded", "range": [5, 6], "title": "Overloaded", "summary": "Talk to someone you trust." }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_quizzes_resolve() {
        let service = build_quiz_service(
            &ContentConfig {
                root: PathBuf::from("public"),
            },
            &SiteConfig::default(),
        );

        let answers = Answers::new()
            .with("q1", "a")
            .with("q2", "b")
            .with("q3", "a")
            .with("q4", "b");
        let report = service
            .score_document("weekend-type", &personality_quiz(), answers, None)
            .expect("personality quiz scores");
        assert_eq!(report.status, ReportStatus::Resolved);
        let view = report.result.expect("catalog result");
        assert_eq!(view.fields.get("title"), Some(&json!("The Weekend Inventor")));

        let answers = Answers::new().with("q1", "c").with("q2", "b").with("q3", "c");
        let report = service
            .score_document("stress-check", &stress_quiz(), answers, None)
            .expect("stress quiz scores");
        let outcome = report.outcome.expect("outcome");
        assert_eq!(outcome.score, Some(5.0));
        assert_eq!(outcome.outcome_type.as_deref(), Some("overloaded"));
    }
}
