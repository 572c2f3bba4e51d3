use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

use crate::core::rates::{RateProvider, RateTable};

/// Client for the exchangerate-api.com v6 `latest` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    conversion_rates: Option<Map<String, Value>>,
    time_last_update_unix: Option<i64>,
}

fn parse_rates(rates: Map<String, Value>) -> Result<Vec<(String, f64)>> {
    rates
        .into_iter()
        .map(|(code, value)| match value.as_f64() {
            Some(rate) => Ok((code, rate)),
            None => Err(anyhow!("Non-numeric rate for {}: {}", code, value)),
        })
        .collect()
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "RateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = self.latest_url(base);
        debug!(
            "Requesting latest rates from {}/v6/***/latest/{}",
            self.base_url, base
        );

        let client = reqwest::Client::builder()
            .user_agent("conversor/0.1")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                anyhow!(
                    "Request error: {} for base currency: {}",
                    e.without_url(),
                    base
                )
            })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                error!(error = ?e, response = %text, "Failed to parse rates response");
                return Err(anyhow!("Failed to parse JSON response for {}: {}", base, e));
            }
        };

        if data.result.as_deref() == Some("error") {
            return Err(anyhow!(
                "Provider error: {} for base currency: {}",
                data.error_type.as_deref().unwrap_or("unknown"),
                base
            ));
        }

        let (base_code, rates) = match (data.base_code, data.conversion_rates) {
            (Some(code), Some(rates)) => (code, rates),
            _ => return Err(anyhow!("No rate data found for base currency: {}", base)),
        };

        let last_updated = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());
        let table =
            RateTable::new(&base_code, parse_rates(rates)?).with_last_updated(last_updated);
        debug!(count = table.len(), "Received rate table");
        Ok(table)
    }
}
