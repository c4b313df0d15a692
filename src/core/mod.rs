//! Core conversion logic abstractions

pub mod currency;
pub mod engine;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{ConversionPair, CurrencyCode};
pub use engine::{ConversionResult, convert, parse_amount};
pub use error::ConvertError;
pub use rates::{RateProvider, RateTable};
