//! Exchange rate table and provider abstraction

use crate::core::currency::CurrencyCode;
use crate::core::error::ConvertError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Snapshot of exchange rates for one base currency, valid only for the
/// request that fetched it. One unit of the base equals `rate` units of the
/// target. Never cached, never mutated after construction.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Builds a table from raw provider entries. Entries with a non-finite
    /// or non-positive rate are dropped so that every stored rate is > 0;
    /// lookups for dropped codes report the rate as unavailable.
    pub fn new(base: CurrencyCode, entries: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let rates = entries
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        RateTable { base, rates }
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Absence of the requested code is an expected outcome, not an error.
    pub fn rate_for(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(&code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rates in catalog order, for display.
    pub fn entries(&self) -> Vec<(CurrencyCode, f64)> {
        CurrencyCode::ALL
            .iter()
            .filter_map(|code| self.rates.get(code).map(|rate| (*code, *rate)))
            .collect()
    }
}

/// Fetches the rate table for a base currency from a remote source. One
/// outbound call per invocation; no retry, no caching.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateTable, ConvertError>;
}
