use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;

use voxnote_core::{CompletionProvider, CompletionReply, CompletionRequest};

enum MockMode {
    Fixed(String),
    /// Return the user prompt as the content, so tests can assert on
    /// exactly what dispatch rendered.
    Echo,
}

/// A mock completion provider for tests: canned or echoed responses, with
/// optional failures on the first N calls.
pub struct MockProvider {
    name: String,
    mode: MockMode,
    fail_first: u32,
    calls: AtomicU32,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: MockMode::Fixed("Mock response".to_string()),
            fail_first: 0,
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.mode = MockMode::Fixed(response.into());
        self
    }

    /// Echo each request's user prompt back as the content.
    pub fn echoing(mut self) -> Self {
        self.mode = MockMode::Echo;
        self
    }

    /// Fail the first `n` calls with a transient error.
    pub fn failing(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }

    /// Total calls observed so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            bail!("mock transient failure");
        }
        let content = match &self.mode {
            MockMode::Fixed(s) => s.clone(),
            MockMode::Echo => request.user_prompt.clone(),
        };
        Ok(CompletionReply {
            content,
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
