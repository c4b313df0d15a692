//! One conversion in flight at a time, last request wins.
//!
//! The original behavior chained fetch-then-compute with a bare await, which
//! lets an older fetch resolve after a newer one and overwrite the fresher
//! result. The session closes that race: submitting a request aborts the
//! previous in-flight task, and a task that still manages to finish after
//! being superseded reports `Outcome::Superseded` instead of a result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::AbortHandle;
use tracing::debug;

use crate::core::currency::ConversionPair;
use crate::core::engine::{ConversionResult, convert, parse_amount};
use crate::core::error::ConvertError;
use crate::core::rates::RateProvider;

/// What an awaited submission resolved to.
#[derive(Debug)]
pub enum Outcome {
    Completed(Result<ConversionResult, ConvertError>),
    /// A newer submission (or a pair swap) replaced this one before its
    /// result could be applied.
    Superseded,
}

pub struct ConversionSession {
    provider: Arc<dyn RateProvider>,
    pair: Mutex<ConversionPair>,
    // Bumped on every submission and swap; a task whose generation is no
    // longer current must not publish its result.
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
    last_result: Mutex<Option<ConversionResult>>,
}

impl ConversionSession {
    pub fn new(provider: Arc<dyn RateProvider>, pair: ConversionPair) -> Self {
        ConversionSession {
            provider,
            pair: Mutex::new(pair),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            last_result: Mutex::new(None),
        }
    }

    pub fn pair(&self) -> ConversionPair {
        *self.pair.lock().unwrap()
    }

    /// Result of the most recent completed, non-superseded conversion.
    pub fn last_result(&self) -> Option<ConversionResult> {
        *self.last_result.lock().unwrap()
    }

    /// Inverts the conversion direction and invalidates the previous result.
    /// Inverted rates are not derivable from the forward table; the next
    /// `submit` performs a fresh fetch.
    pub fn swap_pair(&self) -> ConversionPair {
        let mut pair = self.pair.lock().unwrap();
        *pair = pair.swap();

        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(prior) = self.in_flight.lock().unwrap().take() {
            prior.abort();
        }
        *self.last_result.lock().unwrap() = None;

        debug!(pair = %*pair, "Swapped conversion pair");
        *pair
    }

    /// Runs the fetch-then-convert chain for the current pair. Aborts any
    /// previously submitted task first.
    pub async fn submit(&self, raw_amount: &str) -> Outcome {
        let pair = self.pair();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let provider = Arc::clone(&self.provider);
        let raw = raw_amount.to_string();
        let task = tokio::spawn(async move {
            // Reject bad input before spending a network round trip.
            parse_amount(&raw)?;
            let table = provider.fetch_rates(pair.from).await?;
            convert(&raw, table.rate_for(pair.to), pair.to)
        });

        if let Some(prior) = self
            .in_flight
            .lock()
            .unwrap()
            .replace(task.abort_handle())
        {
            prior.abort();
        }

        match task.await {
            Ok(result) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    debug!("Dropping result of a superseded conversion");
                    return Outcome::Superseded;
                }
                if let Ok(converted) = &result {
                    *self.last_result.lock().unwrap() = Some(*converted);
                }
                Outcome::Completed(result)
            }
            Err(err) if err.is_cancelled() => Outcome::Superseded,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
