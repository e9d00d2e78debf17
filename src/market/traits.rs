use crate::model::{AnalysisError, CoinMetric};

#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches current USD metrics for `coins` in a single request.
    async fn fetch(&self, coins: &[String]) -> Result<Vec<CoinMetric>, AnalysisError>;
}
