//! Amount validation and conversion math.
//!
//! Parsing and multiplication live here, rate lookup does not: the engine
//! receives an already-resolved `Option<f64>` so it stays independent of the
//! provider's transport.

use crate::core::currency::CurrencyCode;
use crate::core::error::ConvertError;

/// Outcome of one successful conversion. Handed straight to the caller for
/// display, never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub rate_used: f64,
}

/// Parses a user-entered amount. Accepts a single `,` as the decimal
/// separator in addition to `.` (pt-BR style input). Only strictly positive
/// finite amounts are accepted; zero carries no information value for a
/// conversion and is rejected like any other invalid input.
pub fn parse_amount(raw: &str) -> Result<f64, ConvertError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::invalid_amount(raw, "amount is empty"));
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let amount: f64 = normalized
        .parse()
        .map_err(|_| ConvertError::invalid_amount(raw, "amount is not a number"))?;

    if !amount.is_finite() {
        return Err(ConvertError::invalid_amount(raw, "amount is not finite"));
    }
    if amount < 0.0 {
        return Err(ConvertError::invalid_amount(raw, "amount is negative"));
    }
    if amount == 0.0 {
        return Err(ConvertError::invalid_amount(raw, "amount is zero"));
    }

    Ok(amount)
}

/// Converts a raw amount with the rate looked up for `target`, or fails with
/// the matching typed error. No rounding here; display formatting owns that.
pub fn convert(
    raw_amount: &str,
    rate: Option<f64>,
    target: CurrencyCode,
) -> Result<ConversionResult, ConvertError> {
    let amount = parse_amount(raw_amount)?;
    let rate = rate.ok_or(ConvertError::RateUnavailable { code: target })?;

    Ok(ConversionResult {
        converted_amount: amount * rate,
        rate_used: rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_multiplies_amount_by_rate() {
        let result = convert("10", Some(5.0), CurrencyCode::Brl).unwrap();
        assert_eq!(result.converted_amount, 50.0);
        assert_eq!(result.rate_used, 5.0);
    }

    #[test]
    fn test_convert_keeps_full_precision() {
        let result = convert("123.45", Some(0.9173), CurrencyCode::Eur).unwrap();
        assert!((result.converted_amount - 123.45 * 0.9173).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_comma_is_accepted() {
        assert_eq!(parse_amount("10,5").unwrap(), 10.5);
        assert_eq!(parse_amount(" 0,25 ").unwrap(), 0.25);
        // Thousands-style input with both separators is not a number.
        assert!(parse_amount("1.000,50").is_err());
    }

    #[test]
    fn test_missing_rate_is_rate_unavailable() {
        let err = convert("10", None, CurrencyCode::Eur).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::RateUnavailable {
                code: CurrencyCode::Eur
            }
        ));
    }

    #[test]
    fn test_invalid_amount_wins_over_missing_rate() {
        // Validation runs before rate lookup, matching the user's mental
        // model: fix the amount first.
        let err = convert("abc", None, CurrencyCode::Eur).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidAmount { .. }));
    }

    #[test]
    fn test_empty_amount_is_rejected() {
        assert!(matches!(
            parse_amount("").unwrap_err(),
            ConvertError::InvalidAmount { .. }
        ));
        assert!(matches!(
            parse_amount("   ").unwrap_err(),
            ConvertError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        for raw in ["abc", "12x", "10.0.0", "--5"] {
            assert!(
                matches!(
                    parse_amount(raw).unwrap_err(),
                    ConvertError::InvalidAmount { .. }
                ),
                "expected InvalidAmount for {raw:?}"
            );
        }
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        for raw in ["0", "0.0", "-5", "-0.01"] {
            assert!(
                matches!(
                    parse_amount(raw).unwrap_err(),
                    ConvertError::InvalidAmount { .. }
                ),
                "expected InvalidAmount for {raw:?}"
            );
        }
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }
}
