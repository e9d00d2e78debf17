use crate::llm::message::{ChatCompletionResponse, CompletionRequest};
use crate::llm::traits::CompletionProvider;
use crate::model::AnalysisError;
use crate::utils::preview;

use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for any OpenAI-compatible `/chat/completions` endpoint (OpenRouter and friends).
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiCompatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        info!(
            "Requesting completion from {} (structured: {})",
            request.model,
            request.response_format.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {:?}", e);
                AnalysisError::UpstreamUnavailable(format!("completion request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("Completion service responded [{}]: {}", status, preview(&body, 200));
            return Err(AnalysisError::UpstreamUnavailable(format!(
                "completion service responded {status}"
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            AnalysisError::UpstreamUnavailable(format!("completion response unreadable: {e}"))
        })?;

        // OpenRouter reports some provider failures inside a 200 body.
        if let Some(error) = body.error {
            warn!("Completion service reported an error: {}", error.message);
            return Err(AnalysisError::UpstreamUnavailable(format!(
                "completion service error: {}",
                error.message
            )));
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AnalysisError::UpstreamUnavailable("completion returned no content".into())
            })?;
        debug!("Completion content: {} bytes", content.len());
        Ok(content)
    }
}
