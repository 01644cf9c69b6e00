//! Core LLM client trait and mock implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client - each call is independent (fresh context)
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (suspends until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model identifier this client sends by default
    fn model(&self) -> &str;
}

/// Mock LLM client returning canned responses, for tests
#[derive(Debug, Default)]
pub struct MockLlmClient {
    responses: std::sync::Mutex<Vec<String>>,
}

impl MockLlmClient {
    /// Create a mock with no responses (completes with empty content)
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return, in FIFO order
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(content.into());
        self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(CompletionResponse::default())
        } else {
            Ok(CompletionResponse::new(responses.remove(0)))
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
