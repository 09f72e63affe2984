use crate::demo::{run_demo, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mindpick::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "MindPick",
    about = "Serve, score and demo MindPick quizzes from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one quiz from the content directory and print the resolved result
    Score(ScoreArgs),
    /// Walk through an MBTI and a sum-range quiz using built-in documents
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding `quizzes/` and `catalog.json`
    #[arg(long)]
    pub(crate) content_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_repeated_answers() {
        let cli = Cli::try_parse_from([
            "mindpick",
            "score",
            "--slug",
            "love-type",
            "--answer",
            "q1=a",
            "--answer",
            "q2=3",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.slug, "love-type");
                assert_eq!(args.answer.len(), 2);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["mindpick"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
