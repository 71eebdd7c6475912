use anyhow::Result;
use async_trait::async_trait;

/// Trait for text-completion backends used by generation dispatch.
///
/// One implementation talks to the real OpenAI chat-completions endpoint;
/// tests substitute a mock.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one completion request and return the raw response.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply>;
}

/// A single system/user prompt pair addressed to a specific model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Raw provider response, before quote normalization.
#[derive(Debug, Clone)]
pub struct CompletionReply {
    pub content: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
