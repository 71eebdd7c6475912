//! The shared completion primitive: one retry-wrapped call to a completion
//! provider, with uniform output normalization.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use voxnote_core::{CompletionProvider, CompletionRequest};

/// Attempts per completion call. No backoff between attempts.
const MAX_RETRIES: u32 = 3;

/// Retry-wrapping client over a completion provider.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Send a system/user prompt pair to the given model and return the
    /// generated text with double-quote characters stripped.
    ///
    /// Transient failures are retried up to [`MAX_RETRIES`] attempts; the
    /// terminal error is re-raised to the caller.
    pub async fn complete(&self, system: &str, user: &str, model: &str) -> Result<String> {
        let request = CompletionRequest {
            model: model.to_string(),
            system_prompt: system.to_string(),
            user_prompt: user.to_string(),
        };

        let mut last_error = None;
        for attempt in 1..=MAX_RETRIES {
            match self.provider.complete(&request).await {
                Ok(reply) => {
                    debug!(
                        provider = %self.provider.name(),
                        model = %reply.model,
                        tokens = reply.tokens_used,
                        latency_ms = reply.latency_ms,
                        "Completion succeeded"
                    );
                    return Ok(reply.content.replace('"', ""));
                }
                Err(e) => {
                    warn!(
                        provider = %self.provider.name(),
                        attempt,
                        max = MAX_RETRIES,
                        error = %e,
                        "Completion attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Err(anyhow::anyhow!("completion made no attempts")),
        }
    }
}
