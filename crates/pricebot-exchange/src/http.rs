//! Shared JSON GET helper.

use pricebot_core::error::{BotError, DataError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Build a client with a request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, BotError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BotError::Config(format!("HTTP client: {}", e)))
}

/// GET `url` and decode the JSON body.
///
/// Transport errors, timeouts, non-success statuses and undecodable bodies
/// all map to `ProviderUnavailable`.
pub(crate) async fn get_json<T, Q>(client: &Client, url: &str, query: &Q) -> Result<T, DataError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    debug!("GET {}", url);

    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| DataError::unavailable(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(DataError::unavailable(format!("{}: {}", status, text)));
    }

    resp.json()
        .await
        .map_err(|e| DataError::unavailable(e.to_string()))
}

/// Render a JSON scalar the way the provider meant it.
pub(crate) fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
