//! Currency catalog and conversion pair types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Supported currency codes. The catalog is fixed at build time; rates for
/// codes outside this set are ignored wherever they appear.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize, ValueEnum,
)]
#[serde(try_from = "String", into = "String")]
#[value(rename_all = "UPPER")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Brl,
    Cad,
    Aud,
    Chf,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 8] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Brl,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
        CurrencyCode::Chf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Brl => "BRL",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Chf => "CHF",
        }
    }

    /// Full currency name, for display alongside the code.
    pub fn name(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "US Dollar",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Gbp => "British Pound",
            CurrencyCode::Jpy => "Japanese Yen",
            CurrencyCode::Brl => "Brazilian Real",
            CurrencyCode::Cad => "Canadian Dollar",
            CurrencyCode::Aud => "Australian Dollar",
            CurrencyCode::Chf => "Swiss Franc",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            "GBP" => Ok(CurrencyCode::Gbp),
            "JPY" => Ok(CurrencyCode::Jpy),
            "BRL" => Ok(CurrencyCode::Brl),
            "CAD" => Ok(CurrencyCode::Cad),
            "AUD" => Ok(CurrencyCode::Aud),
            "CHF" => Ok(CurrencyCode::Chf),
            _ => Err(anyhow::anyhow!("Unsupported currency code: {}", s)),
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|e: anyhow::Error| e.to_string())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.as_str().to_string()
    }
}

/// Ordered (source, destination) currency pair for one conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        ConversionPair { from, to }
    }

    /// Inverts the conversion direction. An inverted pair needs a fresh rate
    /// fetch; forward rates are not reused.
    pub fn swap(self) -> Self {
        ConversionPair {
            from: self.to,
            to: self.from,
        }
    }
}

impl Display for ConversionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in CurrencyCode::ALL {
            let parsed: CurrencyCode = code.as_str().parse().unwrap();
            assert_eq!(parsed, code);
        }
    }

    #[test]
    fn test_code_parse_is_case_insensitive() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::Brl);
        assert_eq!("Usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert!("XYZ".parse::<CurrencyCode>().is_err());
        assert!("".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_cli_argument_accepts_canonical_codes() {
        use clap::Parser;

        #[derive(Parser)]
        struct Args {
            #[arg(value_enum, ignore_case = true)]
            code: CurrencyCode,
        }

        let args = Args::try_parse_from(["cambio", "USD"]).unwrap();
        assert_eq!(args.code, CurrencyCode::Usd);

        // Lowercase input stays accepted.
        let args = Args::try_parse_from(["cambio", "brl"]).unwrap();
        assert_eq!(args.code, CurrencyCode::Brl);

        assert!(Args::try_parse_from(["cambio", "XYZ"]).is_err());
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let pair = ConversionPair::new(CurrencyCode::Usd, CurrencyCode::Brl);
        assert_eq!(pair.swap().swap(), pair);
        assert_eq!(
            pair.swap(),
            ConversionPair::new(CurrencyCode::Brl, CurrencyCode::Usd)
        );
    }
}
