//! OpenAI-compatible chat-completions generator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompt::{system_prompt, user_prompt};
use super::PuzzleGenerator;
use crate::error::QuizError;
use crate::session::DEFAULT_MAX_DIFFICULTY;
use crate::Result;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for [`OpenAiGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Bearer token.
    pub api_key: String,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Upper end of the difficulty scale quoted in the prompt.
    pub max_difficulty: u32,
}

impl GeneratorSettings {
    /// Default settings with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            max_tokens: 150,
            temperature: 0.7,
            timeout: Duration::from_secs(60),
            max_difficulty: DEFAULT_MAX_DIFFICULTY,
        }
    }

    /// Full URL of the completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Generator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiGenerator {
    settings: GeneratorSettings,
    http_client: HttpClient,
}

impl OpenAiGenerator {
    /// Create a new generator.
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("snippet-quiz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuizError::Config(format!("failed to build HTTP client: {}", e)))?;

        Self::with_client(settings, http_client)
    }

    /// Create a generator around a preconfigured HTTP client.
    ///
    /// `settings.timeout` is not applied; configure it on the client.
    pub fn with_client(settings: GeneratorSettings, http_client: HttpClient) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(QuizError::Config("API key is empty".into()));
        }

        Ok(Self {
            settings,
            http_client,
        })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }
}

#[async_trait]
impl PuzzleGenerator for OpenAiGenerator {
    async fn generate(&self, difficulty: u32) -> Result<String> {
        let prompt = user_prompt(difficulty, self.settings.max_difficulty);
        let body = self.request_body(&prompt);

        debug!(model = %self.settings.model, difficulty, "requesting puzzle");

        let response = self
            .http_client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(QuizError::Generation(
                "authentication failed, check your API key".into(),
            )),
            StatusCode::TOO_MANY_REQUESTS => Err(QuizError::Generation(
                "rate limit exceeded, try again later".into(),
            )),
            status if status.is_success() => {
                let text = response.text().await?;
                parse_completion(&text)
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                let message = api_error_message(&text).unwrap_or_else(|| "unknown error".into());
                warn!(%status, "completion request failed");
                Err(QuizError::Generation(format!(
                    "API request failed ({}): {}",
                    status, message
                )))
            }
        }
    }
}

/// Extract the first choice's content from a completion response body.
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| QuizError::Generation(format!("malformed completion response: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(QuizError::Generation("completion contained no text".into()));
    }
    Ok(content)
}

/// Pull `error.message` out of an API error body.
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
