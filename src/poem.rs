use crate::llm::{ChatMessage, CompletionProvider, CompletionRequest};
use crate::model::AnalysisError;
use std::sync::Arc;
use tracing::info;

const WORD_SLOT: &str = "{word}";

pub const POEM_TEMPLATE: &str = r#"
You are an expert poem writer.

You will be given a word as input. Write a humorous poem about it.

Below is the word:

{word}
"#;

/// Free-form completion: one humorous poem per word, no output schema.
pub struct PoemWriter {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl PoemWriter {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn write_poem(&self, word: &str) -> Result<String, AnalysisError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AnalysisError::InvalidRequest("No word provided".into()));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(POEM_TEMPLATE.replace(WORD_SLOT, word))],
            response_format: None,
        };
        info!("Requesting poem about {:?}", word);
        self.provider.complete(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedCompletion;

    #[tokio::test]
    async fn poem_request_is_free_form_and_embeds_the_word() {
        let provider = Arc::new(ScriptedCompletion::replying("Roses are red..."));
        let writer = PoemWriter::new(provider.clone(), "test-model");

        let poem = writer.write_poem("  rust  ").await.unwrap();

        assert_eq!(poem, "Roses are red...");
        let request = provider.last_request().unwrap();
        assert!(request.response_format.is_none());
        assert!(request.messages[0].content.contains("\nrust\n"));
    }

    #[tokio::test]
    async fn blank_word_is_rejected_without_a_call() {
        let provider = Arc::new(ScriptedCompletion::replying("unused"));
        let writer = PoemWriter::new(provider.clone(), "test-model");

        let err = writer.write_poem("   ").await.unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidRequest(_)));
        assert_eq!(provider.calls(), 0);
    }
}
