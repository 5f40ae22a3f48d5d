use std::env;

use async_trait::async_trait;
use quiz_core::model::{Answer, Question};
use reqwest::Client;
use serde::Deserialize;

use crate::error::QuestionSourceError;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_QUESTIONS_URL: &str = "https://quizapp.bitmetrix.io/questions";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSourceConfig {
    pub url: String,
}

impl QuestionSourceConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Reads `QUIZ_QUESTIONS_URL`, falling back to [`DEFAULT_QUESTIONS_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let url = env::var("QUIZ_QUESTIONS_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUESTIONS_URL.into());
        Self { url }
    }
}

impl Default for QuestionSourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS_URL)
    }
}

/// Read-only provider of the quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the full, ordered question list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` if the list cannot be retrieved or decoded.
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError>;

    /// Where the questions come from, for log lines.
    fn describe(&self) -> String;
}

/// Fetches questions with a single GET request. No retries, no auth.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    config: QuestionSourceConfig,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuestionSourceConfig::from_env())
    }

    #[must_use]
    pub fn new(config: QuestionSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let response = self.client.get(&self.config.url).send().await?;

        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        decode_questions(&body)
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

/// Serves a fixed question list.
#[derive(Clone, Debug, Default)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(self.questions.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} questions)", self.questions.len())
    }
}

/// Decode the endpoint payload: an array of `{ "questionBData": {...} }`.
///
/// Questions that fail validation are skipped with a warning.
///
/// # Errors
///
/// Returns `QuestionSourceError::Decode` if the body is not the expected JSON shape.
pub fn decode_questions(body: &str) -> Result<Vec<Question>, QuestionSourceError> {
    let envelopes: Vec<QuestionEnvelope> = serde_json::from_str(body)?;

    let mut questions = Vec::with_capacity(envelopes.len());
    for (position, envelope) in envelopes.into_iter().enumerate() {
        let payload = envelope.question;
        match Question::new(
            payload.text,
            payload.answers,
            payload.correct_answer,
            payload.skill_tested,
            payload.is_multiple_answers,
        ) {
            Ok(question) => questions.push(question),
            Err(err) => tracing::warn!(position, error = %err, "skipping invalid question"),
        }
    }
    Ok(questions)
}

#[derive(Debug, Deserialize)]
struct QuestionEnvelope {
    #[serde(rename = "questionBData")]
    question: QuestionPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    #[serde(rename = "questiontext")]
    text: String,
    answers: Vec<Answer>,
    correct_answer: Vec<Answer>,
    #[serde(default)]
    skill_tested: String,
    #[serde(default)]
    is_multiple_answers: bool,
}
