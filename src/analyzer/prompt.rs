use crate::model::{AnalysisError, CoinMetric};

const MARKET_DATA_SLOT: &str = "{market_data}";

pub const ANALYST_TEMPLATE: &str = r#"
You are "CryptoAnalyst - AI", a professional cryptocurrency market analyst.

You will be given recent market data for multiple cryptocurrencies (price, market cap, volume, 24h change).

Here is the market data:
    {market_data}

Rules:
    - Return one analysis per cryptocurrency
    - Provide 3 key_factors and 3 insights per coin
    - Base your reasoning on the given metrics (e.g. price change %, market cap trend)
"#;

/// Embeds the serialized metrics into the analyst template.
pub fn render_analysis_prompt(metrics: &[CoinMetric]) -> Result<String, AnalysisError> {
    let market_data = serde_json::to_string(metrics)
        .map_err(|e| AnalysisError::DecodeError(format!("metrics could not be serialized: {e}")))?;
    Ok(ANALYST_TEMPLATE.replace(MARKET_DATA_SLOT, &market_data))
}
