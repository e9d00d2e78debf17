use crate::analyzer::AnalysisRequestBuilder;
use crate::config::AppConfig;
use crate::llm::OpenAiCompatClient;
use crate::market::{CoinGeckoFetcher, MarketDataSource};
use crate::model::{AnalysisError, AnalysisResponse, ConfigError};
use crate::utils::build_http_client;
use std::sync::Arc;
use tracing::info;

/// Request pipeline: fetch market data, then ask the model about it.
pub struct CryptoAnalyst {
    market: Arc<dyn MarketDataSource>,
    builder: AnalysisRequestBuilder,
}

impl CryptoAnalyst {
    pub fn new(market: Arc<dyn MarketDataSource>, builder: AnalysisRequestBuilder) -> Self {
        Self { market, builder }
    }

    /// Wires the CoinGecko fetcher and the OpenAI-compatible client from config.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(config.http_timeout)?;
        let market = Arc::new(CoinGeckoFetcher::new(client.clone(), config.coingecko_url.clone()));
        let provider = Arc::new(OpenAiCompatClient::new(
            client,
            config.openrouter_url.clone(),
            config.openrouter_key.clone(),
        ));
        Ok(Self::new(
            market,
            AnalysisRequestBuilder::new(provider, config.model.clone()),
        ))
    }

    pub async fn analyze_coins(&self, coins: &[String]) -> Result<AnalysisResponse, AnalysisError> {
        if coins.is_empty() {
            return Err(AnalysisError::InvalidRequest("No coins provided".into()));
        }

        info!("Analyzing {} coin(s)", coins.len());
        let metrics = self.market.fetch(coins).await?;
        info!("Market data received for {} coin(s)", metrics.len());
        self.builder.analyze(&metrics).await
    }
}
