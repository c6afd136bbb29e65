//! HTTP implementation of the [`QuizBackend`] trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;
use crate::quiz::{QuestionType, QuizConfig};

use super::types::{
    DomainCreate, DomainResponse, HealthResponse, QuestionCreate, QuestionResponse,
    QuizConfigRequest, QuizRequest, QuizResponse,
};
use super::{DEFAULT_API_URL, QuizBackend};

/// Quiz backend client over HTTP.
#[derive(Clone)]
pub struct QuizApi {
    http: HttpClient,
    base_url: String,
}

impl QuizApi {
    #[tracing::instrument(skip(http, base_url))]
    pub fn new(http: HttpClient, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// URL path segment for a diagnostic question kind.
fn questions_path(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::TrueFalse => "true-false",
        QuestionType::ShortAnswer => "short-form",
        QuestionType::MultipleChoice => "multiple-choice",
        QuestionType::FillInBlank => "fill-in-blank",
    }
}

#[async_trait]
impl QuizBackend for QuizApi {
    #[tracing::instrument(skip(self, config))]
    async fn generate_quiz(&self, config: &QuizConfig) -> Result<QuizResponse> {
        // Validate at the boundary, before anything goes on the wire
        config.validate()?;

        let url = format!("{}/api/quiz", self.base_url);
        debug!("Generating quiz for topic {:?}...", config.topic);

        self.http
            .post_json(&url, &QuizConfigRequest::from(config))
            .await
            .context("Failed to generate quiz")
    }

    #[tracing::instrument(skip(self, request))]
    async fn generate_simple(&self, request: &QuizRequest) -> Result<QuizResponse> {
        let url = format!("{}/api/quiz/simple", self.base_url);
        debug!("Generating simple quiz for topic {:?}...", request.topic);

        self.http
            .post_json(&url, request)
            .await
            .context("Failed to generate quiz questions")
    }

    #[tracing::instrument(skip(self, request))]
    async fn generate_questions(&self, request: &QuestionCreate) -> Result<QuestionResponse> {
        let url = format!(
            "{}/questions/{}",
            self.base_url,
            questions_path(request.question_type)
        );
        debug!("Generating diagnostic questions from {}...", url);

        self.http
            .post_json(&url, request)
            .await
            .context("Failed to generate diagnostic questions")
    }

    #[tracing::instrument(skip(self, request))]
    async fn get_domains(&self, request: &DomainCreate) -> Result<DomainResponse> {
        let url = format!("{}/questions/domains", self.base_url);

        self.http
            .post_json(&url, request)
            .await
            .context("Failed to identify domains")
    }

    #[tracing::instrument(skip(self))]
    async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);

        self.http
            .get_json(&url)
            .await
            .context("Backend health check failed")
    }
}
