// Utility functions
use crate::model::ConfigError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USER_AGENT: &str = concat!("crypto-analyst/", env!("CARGO_PKG_VERSION"));

/// Initializes logging; `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);
    }));
}

/// Builds the shared HTTP client. Without a timeout a hung upstream blocks
/// the request until the peer gives up.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, ConfigError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Parses an RFC 3339 string into `DateTime<Utc>`, if possible.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Joins coin identifiers into the `ids` query value. Order and duplicates are kept.
pub fn join_ids(coins: &[String]) -> String {
    coins.join(",")
}

/// Cuts a response body down for log lines.
pub fn preview(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
