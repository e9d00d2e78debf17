use crate::model::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openrouter_key: String,
    pub openrouter_url: String,
    pub coingecko_url: String,
    pub model: String,
    pub bind_addr: SocketAddr,
    pub http_timeout: Option<Duration>,
}

/// Loads configuration from the process environment, reading `.env` first if present.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!(".env could not be read: {}", e);
        }
    }
    AppConfig::from_lookup(|key| std::env::var(key).ok())
}

impl AppConfig {
    /// Builds the config from any key lookup. Missing upstream settings are
    /// only warned about; requests using them fail when they hit the network.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> String {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => value,
                None => {
                    warn!("{} is not set", key);
                    String::new()
                }
            }
        };

        let openrouter_key = required("OPENROUTER_KEY");
        let openrouter_url = required("OPENROUTER_URL");
        let coingecko_url = required("COINGECKO_URL");

        let model = lookup("ANALYST_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                reason: format!("{bind_raw:?}: {e}"),
            })?;

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                    key: "HTTP_TIMEOUT_SECS",
                    reason: format!("{raw:?}: {e}"),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            openrouter_key,
            openrouter_url,
            coingecko_url,
            model,
            bind_addr,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_KEY", "sk-test"),
            ("OPENROUTER_URL", "https://openrouter.ai/api/v1"),
            ("COINGECKO_URL", "https://api.coingecko.com/api/v3/coins/markets"),
        ]))
        .unwrap();

        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.http_timeout, None);
        assert_eq!(cfg.openrouter_key, "sk-test");
    }

    #[test]
    fn missing_upstream_values_are_not_fatal() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(cfg.openrouter_key.is_empty());
        assert!(cfg.coingecko_url.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("ANALYST_MODEL", "openai/gpt-4o-mini"),
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("HTTP_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(cfg.model, "openai/gpt-4o-mini");
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.http_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn malformed_bind_addr_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("BIND_ADDR", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECS"));
    }
}
