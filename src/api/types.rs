//! Wire types for the quiz-generation backend.
//!
//! The quiz endpoints use camelCase field names; the diagnostic question
//! endpoints use snake_case. Both shapes follow the backend's models.

use serde::{Deserialize, Serialize};

use crate::quiz::{Difficulty, QuestionType, QuestionTypeConfig, QuizConfig};

/// Simplified single-type request for `POST /api/quiz/simple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    pub question_type: QuestionType,
    pub num_questions: u32,
    pub difficulty: Difficulty,
}

/// Full multi-type request for `POST /api/quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfigRequest {
    pub topic: String,
    pub question_types: Vec<QuestionTypeConfig>,
    pub difficulty_level: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_objective: Option<String>,
    pub total_questions: u32,
}

impl From<&QuizConfig> for QuizConfigRequest {
    fn from(config: &QuizConfig) -> Self {
        Self {
            topic: config.topic.clone(),
            question_types: config.question_types.clone(),
            difficulty_level: config.difficulty,
            learning_objective: config.learning_objective.clone(),
            total_questions: config.total_questions(),
        }
    }
}

/// A generated quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    /// Present for multiple choice questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// Response body of both quiz endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

/// Request for the diagnostic question endpoints (`POST /questions/<kind>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCreate {
    pub prompt: String,
    pub num_questions: u32,
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
}

/// A generated diagnostic question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "questionType")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Which knowledge domain the question belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Response body of the diagnostic question endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub questions: Vec<DiagnosticQuestion>,
    pub total: u32,
}

/// Request for `POST /questions/domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCreate {
    pub prompt: String,
}

/// A knowledge domain identified for a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub description: String,
}

/// Response body of `POST /questions/domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainResponse {
    pub domains: Vec<Domain>,
    pub single_domain: bool,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_request_serializes_snake_case() {
        let request = QuizRequest {
            topic: "Rust".to_string(),
            question_type: QuestionType::MultipleChoice,
            num_questions: 3,
            difficulty: Difficulty::Medium,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "Rust",
                "question_type": "Multiple Choice",
                "num_questions": 3,
                "difficulty": "Medium"
            })
        );
    }

    #[test]
    fn test_quiz_config_request_serializes_camel_case() {
        let config = QuizConfig {
            topic: "Rust".to_string(),
            question_types: vec![QuestionTypeConfig {
                question_type: QuestionType::TrueFalse,
                count: 2,
            }],
            difficulty: Difficulty::Hard,
            learning_objective: None,
        };

        let json = serde_json::to_value(QuizConfigRequest::from(&config)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "Rust",
                "questionTypes": [{"type": "True/False", "count": 2}],
                "difficultyLevel": "Hard",
                "totalQuestions": 2
            })
        );
    }

    #[test]
    fn test_quiz_response_deserializes_backend_shape() {
        let body = r#"{
            "questions": [
                {
                    "id": 1,
                    "question": "What does the borrow checker enforce?",
                    "options": ["Aliasing xor mutation", "Garbage collection"],
                    "correctAnswer": "Aliasing xor mutation",
                    "type": "Multiple Choice"
                },
                {
                    "id": 2,
                    "question": "Rust has a runtime garbage collector.",
                    "correctAnswer": "False",
                    "type": "True/False"
                }
            ]
        }"#;

        let response: QuizResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.questions.len(), 2);
        assert_eq!(
            response.questions[0].question_type,
            QuestionType::MultipleChoice
        );
        assert_eq!(response.questions[0].options.as_ref().unwrap().len(), 2);
        assert_eq!(response.questions[1].options, None);
        assert_eq!(response.questions[1].correct_answer, "False");
    }

    #[test]
    fn test_question_response_deserializes_optional_fields() {
        let body = r#"{
            "questions": [
                {
                    "id": "q-1",
                    "text": "Ownership moves by default.",
                    "questionType": "True/False",
                    "domain": "Memory management"
                }
            ],
            "total": 1
        }"#;

        let response: QuestionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.questions[0].explanation, None);
        assert_eq!(
            response.questions[0].domain.as_deref(),
            Some("Memory management")
        );
    }

    #[test]
    fn test_domain_response_roundtrip() {
        let response = DomainResponse {
            domains: vec![Domain {
                name: "Lifetimes".to_string(),
                description: "Reference validity".to_string(),
            }],
            single_domain: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: DomainResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }
}
