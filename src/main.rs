use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use quizgen::api::QuizApi;
use quizgen::http::HttpClient;
use quizgen::quiz::{Difficulty, QuestionTypeConfig};
use quizgen::retry::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, RetryPolicy};

/// quizgen - Quiz Generation Client
///
/// Generate educational quizzes through a quiz-generation backend.
///
/// If the QUIZGEN_API_URL environment variable is set, it is used as the
/// backend address instead of the default http://localhost:8000.
///
/// Examples:
///   quizgen generate --topic "Rust ownership"
///   quizgen generate --topic Networking --questions true-false:5 --difficulty hard
#[derive(Parser, Debug)]
#[command(author, version = env!("QUIZGEN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiz backend API URL (defaults to http://localhost:8000)
    #[arg(
        long = "api-url",
        env = "QUIZGEN_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// Maximum attempts per backend request
    #[arg(
        long = "max-attempts",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        global = true
    )]
    pub max_attempts: u32,

    /// Backoff multiplier between attempts in milliseconds
    #[arg(
        long = "retry-delay-ms",
        value_name = "MS",
        default_value_t = DEFAULT_BASE_DELAY_MS,
        global = true
    )]
    pub retry_delay_ms: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a quiz
    Generate(GenerateArgs),

    /// Check that the backend is reachable
    Health(HealthArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Quiz topic
    #[arg(long, value_name = "TOPIC")]
    pub topic: String,

    /// Question types with counts, e.g. "multiple-choice:3" (repeatable)
    #[arg(
        long = "questions",
        value_name = "TYPE[:COUNT]",
        default_value = "multiple-choice:3"
    )]
    pub questions: Vec<QuestionTypeConfig>,

    /// Difficulty level: easy, medium, or hard
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    pub difficulty: Difficulty,

    /// Optional learning objective to steer generation
    #[arg(long, value_name = "TEXT")]
    pub objective: Option<String>,

    /// Write the quiz as JSON to this file instead of printing it
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct HealthArgs {}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let policy = RetryPolicy::new(
        cli.max_attempts,
        Duration::from_millis(cli.retry_delay_ms),
    )?;
    let http = HttpClient::with_policy(reqwest::Client::new(), policy);
    let api = QuizApi::new(http, cli.api_url);

    match cli.command {
        Commands::Generate(args) => {
            let options = quizgen::commands::GenerateOptions {
                topic: args.topic,
                question_types: args.questions,
                difficulty: args.difficulty,
                learning_objective: args.objective,
                output: args.output,
            };
            quizgen::commands::generate(&api, options).await?
        }
        Commands::Health(_args) => quizgen::commands::health(&api).await?,
    }
    Ok(())
}
