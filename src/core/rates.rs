//! Rate table types and the provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Number of entries shown by the rate list.
pub const MAX_LISTED_RATES: usize = 100;

/// Conversion rates relative to a single base currency, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    rates: Vec<(String, f64)>,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    pub fn new(base: &str, rates: Vec<(String, f64)>) -> Self {
        Self {
            base: base.to_uppercase(),
            rates,
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, last_updated: Option<DateTime<Utc>>) -> Self {
        self.last_updated = last_updated;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Rate for `code` relative to the base currency.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, r)| *r)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(c, r)| (c.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// A single row of the rendered rate list.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub code: String,
    pub rate: f64,
}

impl RateEntry {
    pub fn display_rate(&self) -> String {
        format!("{:.2}", self.rate)
    }
}

/// First [`MAX_LISTED_RATES`] entries of `table`, in table order.
pub fn listed_rates(table: &RateTable) -> Vec<RateEntry> {
    table
        .iter()
        .take(MAX_LISTED_RATES)
        .map(|(code, rate)| RateEntry {
            code: code.to_string(),
            rate,
        })
        .collect()
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rate table for `base`.
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}
