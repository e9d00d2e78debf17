use crate::analyzer::prompt::render_analysis_prompt;
use crate::analyzer::schema::{SCHEMA_NAME, analysis_response_schema};
use crate::analyzer::validation::parse_analysis;
use crate::llm::{ChatMessage, CompletionProvider, CompletionRequest, ResponseFormat};
use crate::model::{AnalysisError, AnalysisResponse, CoinMetric};
use std::sync::Arc;
use tracing::info;

/// Turns fetched metrics into a schema-constrained completion and validates the result.
pub struct AnalysisRequestBuilder {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl AnalysisRequestBuilder {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn build_request(&self, metrics: &[CoinMetric]) -> Result<CompletionRequest, AnalysisError> {
        let prompt = render_analysis_prompt(metrics)?;
        Ok(CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            response_format: Some(ResponseFormat::json_schema(
                SCHEMA_NAME,
                analysis_response_schema(),
            )),
        })
    }

    pub async fn analyze(&self, metrics: &[CoinMetric]) -> Result<AnalysisResponse, AnalysisError> {
        if metrics.is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "market data provider returned no coins for the requested ids".into(),
            ));
        }

        let request = self.build_request(metrics)?;
        info!("Requesting analysis for {} coin(s)", metrics.len());

        let content = self.provider.complete(&request).await?;
        let response = parse_analysis(&content, metrics)?;

        for analysis in &response.analyses {
            info!("{}: {}", analysis.coin, analysis.sentiment);
        }
        Ok(response)
    }
}
