use crate::llm::message::CompletionRequest;
use crate::model::AnalysisError;

#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the chat request and returns the assistant's message content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalysisError>;
}
