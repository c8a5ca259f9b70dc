//! Navasan fiat exchange rate integration.

use async_trait::async_trait;
use pricebot_core::error::{BotError, DataError};
use pricebot_core::traits::FiatRateProvider;
use pricebot_core::types::FiatRate;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::http::{build_client, get_json, scalar_to_string};

/// Navasan API configuration.
#[derive(Debug, Clone)]
pub struct NavasanConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl NavasanConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

/// Navasan latest-rates client.
pub struct NavasanClient {
    config: NavasanConfig,
    client: Client,
}

impl NavasanClient {
    /// Create a new Navasan client.
    pub fn new(config: NavasanConfig) -> Result<Self, BotError> {
        if config.api_key.is_empty() {
            return Err(BotError::Config("Navasan API key is empty".into()));
        }
        let client = build_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl FiatRateProvider for NavasanClient {
    async fn rates(&self) -> Result<BTreeMap<String, FiatRate>, DataError> {
        let url = format!("{}/latest/", self.config.base_url.trim_end_matches('/'));
        let body: Map<String, Value> =
            get_json(&self.client, &url, &[("api_key", self.config.api_key.as_str())]).await?;

        let rates = parse_rates(body);
        debug!("Received {} fiat rates", rates.len());
        Ok(rates)
    }

    fn name(&self) -> &str {
        "Navasan"
    }
}

/// Keep every object-shaped entry; anything else in the payload is skipped.
fn parse_rates(body: Map<String, Value>) -> BTreeMap<String, FiatRate> {
    body.into_iter()
        .filter_map(|(symbol, entry)| {
            let entry = entry.as_object()?;
            let field = |name: &str| entry.get(name).and_then(scalar_to_string);

            let rate = FiatRate {
                value: field("value").unwrap_or_else(|| "-".to_string()),
                change: field("change").unwrap_or_else(|| "0".to_string()),
                date: field("date").unwrap_or_default(),
                symbol: symbol.clone(),
            };
            Some((symbol, rate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rates_payload() {
        let body = json!({
            "usd": {"value": "59850", "change": -150, "timestamp": 1700000000, "date": "1402-08-23 12:00:00"},
            "eur": {"value": 64100, "date": "1402-08-23 12:00:00"},
            "status": "ok",
            "sekkeh": {"change": "1000"}
        });

        let Value::Object(map) = body else { unreachable!() };
        let rates = parse_rates(map);

        assert_eq!(rates.len(), 3);
        assert!(!rates.contains_key("status"));

        let usd = &rates["usd"];
        assert_eq!(usd.value, "59850");
        assert_eq!(usd.change, "-150");
        assert_eq!(usd.date, "1402-08-23 12:00:00");

        let eur = &rates["eur"];
        assert_eq!(eur.value, "64100");
        assert_eq!(eur.change, "0");

        assert_eq!(rates["sekkeh"].value, "-");
        assert_eq!(rates["sekkeh"].date, "");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = NavasanClient::new(NavasanConfig::new("http://api.navasan.tech", ""));
        assert!(matches!(result, Err(BotError::Config(_))));
    }
}
