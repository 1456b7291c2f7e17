//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use chrono::{DateTime, Utc};
use safebyte_core::RiskLabel;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::prompt::build_messages;
use crate::text::ensure_terminal_punctuation;

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 140;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no generated text")]
    EmptyResponse,
    #[error("no API token configured")]
    MissingToken,
}

/// Connection and generation settings for [`ExplainClient`].
#[derive(Debug, Clone)]
pub struct ExplainConfig {
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    /// Bearer credential.
    pub token: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request timeout; `None` leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            token: String::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }
}

/// Generated explanation, already normalized to end in terminal punctuation.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client that asks a hosted language model to explain a predicted risk level.
pub struct ExplainClient {
    client: reqwest::Client,
    config: ExplainConfig,
}

impl ExplainClient {
    /// Create a client. Fails if no token is configured.
    pub fn new(config: ExplainConfig) -> Result<Self, ExplainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(config, builder.build()?)
    }

    /// Create a client on top of an existing [`reqwest::Client`].
    ///
    /// `config.timeout` is ignored; configure it on `client` instead.
    pub fn with_http_client(
        mut config: ExplainConfig,
        client: reqwest::Client,
    ) -> Result<Self, ExplainError> {
        if config.token.trim().is_empty() {
            return Err(ExplainError::MissingToken);
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Request a three-sentence explanation of `label` for a food item.
    ///
    /// No retries: any transport, status, or parse failure is returned.
    pub async fn explain(
        &self,
        food_item: &str,
        guideline: &str,
        label: &RiskLabel,
    ) -> Result<Explanation, ExplainError> {
        let messages = build_messages(food_item, guideline, label);
        let request = ChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = self.completions_url();
        info!(
            url = %url,
            model = %self.config.model,
            food_item,
            label = %label,
            "requesting explanation"
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplainError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let text = parse_completion(&body)?;
        info!(chars = text.len(), "explanation received");

        Ok(Explanation {
            text,
            model: self.config.model.clone(),
            generated_at: Utc::now(),
        })
    }
}

/// Pull the first choice's content out of a completion body and normalize it.
fn parse_completion(body: &str) -> Result<String, ExplainError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(ExplainError::EmptyResponse)?;

    let text = ensure_terminal_punctuation(&content);
    if text.is_empty() {
        return Err(ExplainError::EmptyResponse);
    }
    Ok(text)
}
