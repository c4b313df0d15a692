pub mod cli;
pub mod config;
pub mod convert;
pub mod core;
pub mod providers;
pub mod session;

use crate::core::currency::{ConversionPair, CurrencyCode};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands the CLI dispatches into the library.
pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<CurrencyCode>,
        to: Option<CurrencyCode>,
    },
    Rates {
        base: Option<CurrencyCode>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::OpenErApiProvider::new(&config.provider.base_url);

    match command {
        AppCommand::Convert { amount, from, to } => {
            let defaults = config.default_pair();
            let pair =
                ConversionPair::new(from.unwrap_or(defaults.from), to.unwrap_or(defaults.to));
            convert::run_conversion(&amount, pair, Arc::new(provider)).await
        }
        AppCommand::Rates { base } => {
            convert::show_rates(base.unwrap_or(config.from), &provider).await
        }
    }
}
