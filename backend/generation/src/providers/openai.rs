use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use voxnote_core::{CompletionProvider, CompletionReply, CompletionRequest, VoxError};

/// Environment variable holding the OpenAI API key.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI chat-completions provider.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Build a provider from the environment, failing eagerly (before any
    /// network call) when the credential is absent.
    pub fn from_env() -> Result<Self, VoxError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(VoxError::Credential(format!(
                "{API_KEY_VAR} environment variable is not set"
            ))),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply> {
        let start = Instant::now();

        let body = ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
        };

        debug!(model = %request.model, "Sending request to OpenAI");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("OpenAI HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI returned {}: {}", status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        let tokens_used = chat_response
            .usage
            .and_then(|u| u.total_tokens)
            .unwrap_or(0);

        Ok(CompletionReply {
            content,
            model: request.model.clone(),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
