// JSON schema sent as the structured-output format for AnalysisResponse
use serde_json::{Value, json};

pub const SCHEMA_NAME: &str = "crypto_analysis_response";
pub const FACTORS_PER_COIN: usize = 3;
pub const INSIGHTS_PER_COIN: usize = 3;
pub const MIN_CONFIDENCE: i64 = 0;
pub const MAX_CONFIDENCE: i64 = 100;

pub fn analysis_response_schema() -> Value {
    let market_factor = json!({
        "type": "object",
        "properties": {
            "factor": {
                "type": "string",
                "description": "Name or short description of the market factor influencing the coin (e.g. ETF approval, regulation)"
            },
            "impact": {
                "type": "string",
                "description": "How this factor affects the coin's price or sentiment"
            }
        },
        "required": ["factor", "impact"],
        "additionalProperties": false
    });

    let insight = json!({
        "type": "object",
        "properties": {
            "prediction": {
                "type": "string",
                "description": "Specific prediction about the coin's possible price movement or market behavior"
            },
            "confidence": {
                "type": "integer",
                "minimum": MIN_CONFIDENCE,
                "maximum": MAX_CONFIDENCE,
                "description": "Confidence level (0-100) indicating how strongly the prediction is supported"
            }
        },
        "required": ["prediction", "confidence"],
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "analysis": {
                "type": "array",
                "description": "One analysis per cryptocurrency",
                "items": {
                    "type": "object",
                    "properties": {
                        "coin": {
                            "type": "string",
                            "description": "Cryptocurrency name or symbol being analyzed (e.g. 'BTC', 'ETH')"
                        },
                        "summary": {
                            "type": "string",
                            "description": "Short summary of the current market state for the coin"
                        },
                        "sentiment": {
                            "type": "string",
                            "enum": ["bullish", "neutral", "bearish"],
                            "description": "Overall market sentiment for the coin based on current data"
                        },
                        "key_factors": {
                            "type": "array",
                            "items": market_factor,
                            "minItems": FACTORS_PER_COIN,
                            "maxItems": FACTORS_PER_COIN
                        },
                        "insights": {
                            "type": "array",
                            "items": insight,
                            "minItems": INSIGHTS_PER_COIN,
                            "maxItems": INSIGHTS_PER_COIN
                        }
                    },
                    "required": ["coin", "summary", "sentiment", "key_factors", "insights"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["analysis"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_bounds_and_enum() {
        let schema = analysis_response_schema();
        let item = &schema["properties"]["analysis"]["items"];

        assert_eq!(
            item["properties"]["sentiment"]["enum"],
            json!(["bullish", "neutral", "bearish"])
        );
        let confidence = &item["properties"]["insights"]["items"]["properties"]["confidence"];
        assert_eq!(confidence["minimum"], 0);
        assert_eq!(confidence["maximum"], 100);
        assert_eq!(item["properties"]["key_factors"]["minItems"], 3);
        assert_eq!(item["properties"]["insights"]["maxItems"], 3);
    }
}
