//! Client for the quiz-generation backend.
//!
//! [`QuizBackend`] abstracts the backend's endpoints so command code can be
//! tested against a mock; [`QuizApi`] is the HTTP implementation, with every
//! call routed through the retry executor.

mod client;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use client::QuizApi;
pub use types::{
    DiagnosticQuestion, Domain, DomainCreate, DomainResponse, HealthResponse, QuestionCreate,
    QuestionResponse, QuizConfigRequest, QuizQuestion, QuizRequest, QuizResponse,
};

use crate::quiz::QuizConfig;

/// Default backend address for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Operations offered by the quiz-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Generate a quiz from a full multi-type configuration.
    async fn generate_quiz(&self, config: &QuizConfig) -> Result<QuizResponse>;

    /// Generate a quiz with a single question type.
    async fn generate_simple(&self, request: &QuizRequest) -> Result<QuizResponse>;

    /// Generate diagnostic questions of the kind named in the request.
    async fn generate_questions(&self, request: &QuestionCreate) -> Result<QuestionResponse>;

    /// Identify the knowledge domains covered by a prompt.
    async fn get_domains(&self, request: &DomainCreate) -> Result<DomainResponse>;

    /// Check backend liveness.
    async fn health(&self) -> Result<HealthResponse>;
}
