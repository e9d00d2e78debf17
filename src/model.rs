// Core structs: CoinMetric, Analysis, AnalysisResponse and the error enums
use crate::utils::parse_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// One coin as returned by the market-data provider.
///
/// The provider object is kept as-is and reaches the prompt unchanged; only
/// `id` is required. The accessors read fields without enforcing their types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CoinMetric {
    id: String,
    fields: Map<String, Value>,
}

impl CoinMetric {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn symbol(&self) -> Option<&str> {
        self.fields.get("symbol").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn current_price(&self) -> Option<f64> {
        self.number("current_price")
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.number("market_cap")
    }

    pub fn total_volume(&self) -> Option<f64> {
        self.number("total_volume")
    }

    pub fn price_change_percentage_24h(&self) -> Option<f64> {
        self.number("price_change_percentage_24h")
    }

    /// `None` when absent or not RFC 3339.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.fields
            .get("last_updated")
            .and_then(Value::as_str)
            .and_then(parse_datetime)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }
}

impl TryFrom<Map<String, Value>> for CoinMetric {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(other) => return Err(format!("coin id must be a non-empty string, got {other}")),
            None => return Err("coin entry without an id".to_string()),
        };
        Ok(Self { id, fields })
    }
}

impl From<CoinMetric> for Map<String, Value> {
    fn from(metric: CoinMetric) -> Self {
        metric.fields
    }
}

/// Inbound body of `POST /crypto/analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub coins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Neutral => "neutral",
            Sentiment::Bearish => "bearish",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFactor {
    /// Name or short description, e.g. "ETF approval".
    pub factor: String,
    /// How the factor moves price or sentiment.
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub prediction: String,
    /// Must lie in 0..=100. Kept signed so out-of-range model output decodes
    /// and is rejected by validation instead of by the integer parser.
    pub confidence: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub coin: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub key_factors: Vec<MarketFactor>,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "analysis")]
    pub analyses: Vec<Analysis>,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("decode error: {0}")]
    DecodeError(String),
    #[error("schema validation failed: {0}")]
    SchemaValidationError(String),
}

impl AnalysisError {
    /// Stable machine-readable name, used in error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest(_) => "invalid_request",
            AnalysisError::UpstreamUnavailable(_) => "upstream_unavailable",
            AnalysisError::DecodeError(_) => "decode_error",
            AnalysisError::SchemaValidationError(_) => "schema_validation_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}
