use crate::market::traits::MarketDataSource;
use crate::model::{AnalysisError, CoinMetric};
use crate::utils::{join_ids, preview};

use reqwest::Client;
use tracing::{debug, info, warn};

pub const VS_CURRENCY: &str = "usd";

/// Market-data client for a CoinGecko `coins/markets` style endpoint.
pub struct CoinGeckoFetcher {
    client: Client,
    base_url: String,
}

impl CoinGeckoFetcher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_query(coins: &[String]) -> [(&'static str, String); 2] {
        [
            ("vs_currency", VS_CURRENCY.to_string()),
            ("ids", join_ids(coins)),
        ]
    }
}

#[async_trait::async_trait]
impl MarketDataSource for CoinGeckoFetcher {
    async fn fetch(&self, coins: &[String]) -> Result<Vec<CoinMetric>, AnalysisError> {
        if coins.is_empty() {
            return Err(AnalysisError::InvalidRequest("No coins provided".into()));
        }

        let query = Self::build_query(coins);
        info!("Fetching market data for ids={}", query[1].1);

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!("Market data request failed: {:?}", e);
                AnalysisError::UpstreamUnavailable(format!("market data request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("Market data provider responded [{}]: {}", status, preview(&body, 200));
            return Err(AnalysisError::UpstreamUnavailable(format!(
                "market data provider responded {status}"
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            AnalysisError::UpstreamUnavailable(format!("market data body could not be read: {e}"))
        })?;
        debug!("Market data body: {} bytes", body.len());

        let metrics = serde_json::from_slice::<Vec<CoinMetric>>(&body)
            .map_err(|e| AnalysisError::DecodeError(format!("market data is not a coin list: {e}")))?;
        for metric in &metrics {
            debug!(
                "{}: price={:?} change_24h={:?} updated={:?}",
                metric.id(),
                metric.current_price(),
                metric.price_change_percentage_24h(),
                metric.last_updated()
            );
        }
        Ok(metrics)
    }
}
