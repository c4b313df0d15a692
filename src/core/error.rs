//! Typed failure taxonomy for the conversion pipeline.
//!
//! Each variant maps to a distinct user-facing message at the CLI boundary;
//! none of them is collapsed into a generic failure.

use crate::core::currency::CurrencyCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The remote rate source was unreachable or answered with a non-success
    /// status. Retryable by the caller; the core never retries.
    #[error("Network error while fetching rates: {0}")]
    Network(String),

    /// The remote source answered, but the payload did not match the
    /// expected rate table contract. Not retryable.
    #[error("Malformed response from rate source: {0}")]
    MalformedResponse(String),

    /// The requested destination currency has no entry in the fetched rate
    /// table. Expected outcome, distinct from a transport failure.
    #[error("No exchange rate available for {code}")]
    RateUnavailable { code: CurrencyCode },

    /// The user-entered amount could not be accepted.
    #[error("Invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },
}

impl ConvertError {
    pub fn invalid_amount(input: &str, reason: &str) -> Self {
        ConvertError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
