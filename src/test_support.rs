// Deterministic stand-ins for the two upstream services, shared by unit tests.
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::market::MarketDataSource;
use crate::model::{AnalysisError, CoinMetric};
use axum::Router;
use serde_json::json;
use std::sync::Mutex;

pub fn metric(id: &str) -> CoinMetric {
    serde_json::from_value(json!({
        "id": id,
        "symbol": id.to_lowercase(),
        "name": id,
        "current_price": 100.0,
        "market_cap": 1_000_000.0,
        "total_volume": 50_000.0,
        "price_change_percentage_24h": 1.5
    }))
    .unwrap()
}

/// A conforming model reply with one analysis per coin.
pub fn analysis_json(coins: &[&str]) -> String {
    let analyses: Vec<_> = coins
        .iter()
        .map(|coin| {
            json!({
                "coin": coin,
                "summary": format!("{coin} is trading sideways."),
                "sentiment": "neutral",
                "key_factors": [
                    {"factor": "Volume", "impact": "Stable liquidity"},
                    {"factor": "Market cap", "impact": "Large and steady"},
                    {"factor": "24h change", "impact": "Small positive drift"}
                ],
                "insights": [
                    {"prediction": "Holds current range", "confidence": 60},
                    {"prediction": "Breakout above resistance", "confidence": 25},
                    {"prediction": "Volume stays flat", "confidence": 70}
                ]
            })
        })
        .collect();
    json!({ "analysis": analyses }).to_string()
}

/// Binds a throwaway HTTP server on loopback and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct StubMarket {
    failure: Option<(fn(String) -> AnalysisError, String)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl StubMarket {
    /// Returns one metric per requested id.
    pub fn echo() -> Self {
        Self {
            failure: None,
            calls: Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some((AnalysisError::UpstreamUnavailable, message.to_string())),
            calls: Mutex::default(),
        }
    }

    /// Fails the way an unparseable provider body does.
    pub fn undecodable(message: &str) -> Self {
        Self {
            failure: Some((AnalysisError::DecodeError, message.to_string())),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MarketDataSource for StubMarket {
    async fn fetch(&self, coins: &[String]) -> Result<Vec<CoinMetric>, AnalysisError> {
        self.calls.lock().unwrap().push(coins.to_vec());
        match &self.failure {
            Some((to_error, message)) => Err(to_error(message.clone())),
            None => Ok(coins.iter().map(|id| metric(id)).collect()),
        }
    }
}

pub struct ScriptedCompletion {
    reply: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(content.into()),
            requests: Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .map_err(AnalysisError::UpstreamUnavailable)
    }
}
