//! Generate a quiz through the backend and render or save the result.

use anyhow::{Context, Result};
use log::info;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::api::{QuizBackend, QuizRequest, QuizResponse};
use crate::quiz::{Difficulty, QuestionTypeConfig, QuizConfig};

/// User-facing options for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub topic: String,
    pub question_types: Vec<QuestionTypeConfig>,
    pub difficulty: Difficulty,
    pub learning_objective: Option<String>,
    /// Write the quiz as JSON to this path instead of printing it.
    pub output: Option<PathBuf>,
}

/// Request a quiz and print it, or write it to `--output` as JSON.
#[tracing::instrument(skip(backend, options))]
pub async fn generate(backend: &dyn QuizBackend, options: GenerateOptions) -> Result<()> {
    let config = QuizConfig {
        topic: options.topic,
        question_types: options.question_types,
        difficulty: options.difficulty,
        learning_objective: options.learning_objective,
    };
    config.validate()?;

    info!(
        "Requesting {} question(s) on {:?}...",
        config.total_questions(),
        config.topic
    );

    let response = if let [single] = config.question_types.as_slice() {
        // Single-type quizzes go through the simplified endpoint
        let request = QuizRequest {
            topic: config.topic.clone(),
            question_type: single.question_type,
            num_questions: single.count,
            difficulty: config.difficulty,
        };
        backend.generate_simple(&request).await?
    } else {
        backend.generate_quiz(&config).await?
    };

    match options.output {
        Some(path) => {
            let json =
                serde_json::to_string_pretty(&response).context("Failed to serialize quiz")?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write quiz to {:?}", path))?;
            println!(
                "Wrote {} question(s) to {}",
                response.questions.len(),
                path.display()
            );
        }
        None => print!("{}", render_quiz(&config, &response)),
    }

    Ok(())
}

/// Formats a quiz for terminal output.
fn render_quiz(config: &QuizConfig, response: &QuizResponse) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Generated {} question(s) for \"{}\" ({})",
        response.questions.len(),
        config.topic,
        config.difficulty
    );

    for (index, question) in response.questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. [{}] {}",
            index + 1,
            question.question_type,
            question.question
        );
        if let Some(options) = &question.options {
            for (i, option) in options.iter().enumerate() {
                let letter = (b'A' + (i % 26) as u8) as char;
                let _ = writeln!(out, "   {}. {}", letter, option);
            }
        }
        let _ = writeln!(out, "   Answer: {}", question.correct_answer);
    }

    out
}
