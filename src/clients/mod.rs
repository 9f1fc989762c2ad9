use async_trait::async_trait;

use crate::error::Result;

pub mod openai;

/// A single-turn completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

/// Text completion capability. Implemented by [`openai::OpenAiClient`];
/// tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the generated text, already trimmed. Empty when the service
    /// produced no content.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
