use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::core::currency::CurrencyCode;
use crate::core::error::ConvertError;
use crate::core::rates::{RateProvider, RateTable};
use async_trait::async_trait;

/// Rate provider speaking the open.er-api.com contract:
/// `GET {base_url}/v4/latest/{BASE}` returns a JSON object with a `rates`
/// map keyed by currency code.
pub struct OpenErApiProvider {
    base_url: String,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str) -> Self {
        OpenErApiProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct RatesResponse {
    #[serde(alias = "base_code", alias = "base")]
    base: String,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    #[instrument(name = "RateFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateTable, ConvertError> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(|e| ConvertError::Network(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConvertError::Network(format!("{e} for base currency: {base}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Network(format!(
                "HTTP {status} for base currency: {base}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConvertError::Network(e.to_string()))?;

        let data: RatesResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(base = %base, error = %e, "Rate payload did not match contract");
            ConvertError::MalformedResponse(format!("{e} for base currency: {base}"))
        })?;
        debug!(base = %data.base, count = data.rates.len(), "Parsed rate payload");

        // Codes outside the catalog are skipped; the catalog is closed.
        let entries = data.rates.into_iter().filter_map(|(code, rate)| {
            code.parse::<CurrencyCode>().ok().map(|code| (code, rate))
        });

        Ok(RateTable::new(base, entries))
    }
}
