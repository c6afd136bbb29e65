//! Quiz domain model and configuration validation.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum total questions allowed in one quiz.
pub const MAX_TOTAL_QUESTIONS: u32 = 20;

/// Maximum questions allowed per question type.
pub const MAX_QUESTIONS_PER_TYPE: u32 = 10;

/// The kinds of questions the backend can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Fill in the Blank")]
    FillInBlank,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::ShortAnswer,
        QuestionType::TrueFalse,
        QuestionType::FillInBlank,
    ];
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "Multiple Choice"),
            QuestionType::ShortAnswer => write!(f, "Short Answer"),
            QuestionType::TrueFalse => write!(f, "True/False"),
            QuestionType::FillInBlank => write!(f, "Fill in the Blank"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple choice" | "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "short answer" | "short-answer" => Ok(QuestionType::ShortAnswer),
            "true/false" | "true-false" => Ok(QuestionType::TrueFalse),
            "fill in the blank" | "fill-in-blank" => Ok(QuestionType::FillInBlank),
            _ => anyhow::bail!(
                "Unknown question type: {}. Expected multiple-choice, short-answer, true-false, or fill-in-blank.",
                s
            ),
        }
    }
}

/// Quiz difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => anyhow::bail!("Unknown difficulty: {}. Expected easy, medium, or hard.", s),
        }
    }
}

/// One question type and how many questions of it to generate.
///
/// Parses from "TYPE" or "TYPE:COUNT" (e.g. "multiple-choice:3").
/// A bare type defaults to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypeConfig {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub count: u32,
}

impl fmt::Display for QuestionTypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.question_type, self.count)
    }
}

impl FromStr for QuestionTypeConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_part, count) = match s.rsplit_once(':') {
            Some((type_part, count_part)) => {
                let count = count_part.parse::<u32>().map_err(|_| {
                    anyhow::anyhow!(
                        "Invalid question count: {}. Expected 'TYPE:COUNT' with a numeric count.",
                        count_part
                    )
                })?;
                (type_part, count)
            }
            None => (s, 1),
        };

        Ok(QuestionTypeConfig {
            question_type: type_part.parse()?,
            count,
        })
    }
}

/// A complete quiz request as configured by the user, validated before it is
/// handed to the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub topic: String,
    pub question_types: Vec<QuestionTypeConfig>,
    pub difficulty: Difficulty,
    pub learning_objective: Option<String>,
}

impl QuizConfig {
    pub fn total_questions(&self) -> u32 {
        self.question_types.iter().map(|qt| qt.count).sum()
    }

    /// Checks the configuration against the backend's limits.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            anyhow::bail!("A quiz topic is required");
        }

        if self.question_types.is_empty() {
            anyhow::bail!("At least one question type is required");
        }

        let total = self.total_questions();
        if total == 0 {
            anyhow::bail!("Total number of questions must be greater than 0");
        }
        if total > MAX_TOTAL_QUESTIONS {
            anyhow::bail!("Maximum total questions allowed is {}", MAX_TOTAL_QUESTIONS);
        }

        if self
            .question_types
            .iter()
            .any(|qt| qt.count < 1 || qt.count > MAX_QUESTIONS_PER_TYPE)
        {
            anyhow::bail!(
                "Each question type must have between 1 and {} questions",
                MAX_QUESTIONS_PER_TYPE
            );
        }

        Ok(())
    }
}
