use crate::analyzer::schema::{FACTORS_PER_COIN, INSIGHTS_PER_COIN, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::model::{AnalysisError, AnalysisResponse, CoinMetric};
use std::collections::HashSet;

/// Parses model output into an `AnalysisResponse` and checks it against the
/// declared schema and the coins that were analysed. Nothing is clamped or repaired.
pub fn parse_analysis(content: &str, metrics: &[CoinMetric]) -> Result<AnalysisResponse, AnalysisError> {
    let payload = strip_code_fence(content);
    let response: AnalysisResponse = serde_json::from_str(payload)
        .map_err(|e| AnalysisError::SchemaValidationError(format!("model output does not match schema: {e}")))?;
    validate(&response, metrics)?;
    Ok(response)
}

pub fn validate(response: &AnalysisResponse, metrics: &[CoinMetric]) -> Result<(), AnalysisError> {
    let coins = distinct_coins(metrics);
    if response.analyses.len() != coins.len() {
        return Err(AnalysisError::SchemaValidationError(format!(
            "expected {} analyses, got {}",
            coins.len(),
            response.analyses.len()
        )));
    }

    let mut covered = HashSet::new();
    for analysis in &response.analyses {
        let Some(coin) = coins.iter().find(|c| c.matches(&analysis.coin)) else {
            return Err(AnalysisError::SchemaValidationError(format!(
                "analysis for {:?} matches none of the requested coins",
                analysis.coin
            )));
        };
        if !covered.insert(coin.id) {
            return Err(AnalysisError::SchemaValidationError(format!(
                "{} is analysed more than once",
                coin.id
            )));
        }

        if analysis.key_factors.len() != FACTORS_PER_COIN {
            return Err(AnalysisError::SchemaValidationError(format!(
                "{}: expected {} key_factors, got {}",
                analysis.coin,
                FACTORS_PER_COIN,
                analysis.key_factors.len()
            )));
        }
        if analysis.insights.len() != INSIGHTS_PER_COIN {
            return Err(AnalysisError::SchemaValidationError(format!(
                "{}: expected {} insights, got {}",
                analysis.coin,
                INSIGHTS_PER_COIN,
                analysis.insights.len()
            )));
        }
        if let Some(bad) = analysis
            .insights
            .iter()
            .find(|i| !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&i.confidence))
        {
            return Err(AnalysisError::SchemaValidationError(format!(
                "{}: confidence {} outside {}..={}",
                analysis.coin, bad.confidence, MIN_CONFIDENCE, MAX_CONFIDENCE
            )));
        }
    }

    Ok(())
}

/// A requested coin and the names a model may use for it (id, symbol, name).
struct CoinNames<'a> {
    id: &'a str,
    aliases: Vec<&'a str>,
}

impl CoinNames<'_> {
    fn matches(&self, label: &str) -> bool {
        let label = label.trim();
        self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(label))
    }
}

fn distinct_coins(metrics: &[CoinMetric]) -> Vec<CoinNames<'_>> {
    let mut seen = HashSet::new();
    metrics
        .iter()
        .filter(|&m| seen.insert(m.id()))
        .map(|m| CoinNames {
            id: m.id(),
            aliases: [Some(m.id()), m.symbol(), m.name()].into_iter().flatten().collect(),
        })
        .collect()
}

// Some OpenAI-compatible backends wrap JSON output in a markdown fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
