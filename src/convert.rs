//! Command flows: run a conversion or display a rate table, then render.

use crate::cli::ui;
use crate::core::currency::{ConversionPair, CurrencyCode};
use crate::core::engine::ConversionResult;
use crate::core::error::ConvertError;
use crate::core::rates::{RateProvider, RateTable};
use crate::session::{ConversionSession, Outcome};
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;
use tracing::debug;

/// Fetches the rate for `pair` and converts `raw_amount`, printing a result
/// card or a failure-specific message.
pub async fn run_conversion(
    raw_amount: &str,
    pair: ConversionPair,
    provider: Arc<dyn RateProvider>,
) -> Result<()> {
    let session = ConversionSession::new(provider, pair);

    let pb = ui::new_spinner(&format!("Fetching {} rates...", pair.from));
    let outcome = session.submit(raw_amount).await;
    pb.finish_and_clear();

    match outcome {
        Outcome::Completed(Ok(result)) => {
            println!("{}", render_result_card(raw_amount, pair, &result));
            Ok(())
        }
        Outcome::Completed(Err(err)) => {
            eprintln!("{}", ui::style_text(&user_message(&err), ui::StyleType::Error));
            Err(err.into())
        }
        Outcome::Superseded => {
            // A single CLI invocation submits once; nothing to display.
            debug!("Conversion superseded before completion");
            Ok(())
        }
    }
}

/// Fetches and prints the full rate table for `base`.
pub async fn show_rates(base: CurrencyCode, provider: &dyn RateProvider) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching {base} rates..."));
    let fetched = provider.fetch_rates(base).await;
    pb.finish_and_clear();

    match fetched {
        Ok(table) => {
            println!("{}", render_rate_table(&table));
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", ui::style_text(&user_message(&err), ui::StyleType::Error));
            Err(err.into())
        }
    }
}

/// One distinct message per failure kind; none of them collapses into a
/// generic alert.
pub fn user_message(err: &ConvertError) -> String {
    match err {
        ConvertError::Network(_) => {
            "Could not reach the exchange rate service. Check your connection and try again."
                .to_string()
        }
        ConvertError::MalformedResponse(_) => {
            "The exchange rate service returned an unexpected response. Try again later."
                .to_string()
        }
        ConvertError::RateUnavailable { code } => {
            format!("No exchange rate is available for {code}. Pick a different currency pair.")
        }
        ConvertError::InvalidAmount { input, .. } => {
            format!("{input:?} is not a valid amount. Enter a positive number.")
        }
    }
}

fn render_result_card(
    raw_amount: &str,
    pair: ConversionPair,
    result: &ConversionResult,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("From"), ui::header_cell("To")]);
    table.add_row(vec![
        Cell::new(format!("{} {}", raw_amount.trim(), pair.from)),
        ui::value_cell(&format!("{:.2} {}", result.converted_amount, pair.to)),
    ]);

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Conversion result", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n1 {} = {} {}",
        pair.from,
        ui::style_text(&format!("{:.4}", result.rate_used), ui::StyleType::ResultValue),
        pair.to
    ));
    output
}

fn render_rate_table(table: &RateTable) -> String {
    let base = table.base();

    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate (1 {base})")),
    ]);

    for (code, rate) in table.entries() {
        out.add_row(vec![
            Cell::new(code.as_str()),
            Cell::new(code.name()),
            ui::value_cell(&format!("{rate:.4}")),
        ]);
    }

    let mut output = format!(
        "Rates for {}\n\n",
        ui::style_text(base.as_str(), ui::StyleType::Title)
    );
    output.push_str(&out.to_string());
    if table.is_empty() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text("No supported currencies in this table.", ui::StyleType::Subtle)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_card_shows_amounts_and_rate() {
        let pair = ConversionPair::new(CurrencyCode::Usd, CurrencyCode::Brl);
        let result = ConversionResult {
            converted_amount: 50.0,
            rate_used: 5.0,
        };

        let card = render_result_card("10", pair, &result);
        assert!(card.contains("10 USD"));
        assert!(card.contains("50.00 BRL"));
        assert!(card.contains("5.0000"));
    }

    #[test]
    fn test_rate_table_lists_catalog_rates() {
        let table = RateTable::new(
            CurrencyCode::Usd,
            [(CurrencyCode::Brl, 5.0), (CurrencyCode::Eur, 0.9)],
        );

        let rendered = render_rate_table(&table);
        assert!(rendered.contains("BRL"));
        assert!(rendered.contains("Brazilian Real"));
        assert!(rendered.contains("5.0000"));
        assert!(rendered.contains("0.9000"));
    }

    #[test]
    fn test_each_error_kind_gets_a_distinct_message() {
        let errors = [
            ConvertError::Network("timeout".to_string()),
            ConvertError::MalformedResponse("bad json".to_string()),
            ConvertError::RateUnavailable {
                code: CurrencyCode::Eur,
            },
            ConvertError::invalid_amount("abc", "amount is not a number"),
        ];

        let messages: Vec<String> = errors.iter().map(user_message).collect();
        for (i, msg) in messages.iter().enumerate() {
            for (j, other) in messages.iter().enumerate() {
                if i != j {
                    assert_ne!(msg, other);
                }
            }
        }
        assert!(messages[2].contains("EUR"));
        assert!(messages[3].contains("abc"));
    }
}
