use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::currency::{ConversionPair, CurrencyCode};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://open.er-api.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_from")]
    pub from: CurrencyCode,
    #[serde(default = "default_to")]
    pub to: CurrencyCode,
}

fn default_from() -> CurrencyCode {
    CurrencyCode::Usd
}

fn default_to() -> CurrencyCode {
    CurrencyCode::Brl
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            from: default_from(),
            to: default_to(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location; missing file falls back
    /// to defaults so the converter works out of the box.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn default_pair(&self) -> ConversionPair {
        ConversionPair::new(self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/rates"
from: "EUR"
to: "GBP"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/rates");
        assert_eq!(config.from, CurrencyCode::Eur);
        assert_eq!(config.to, CurrencyCode::Gbp);
    }

    #[test]
    fn test_config_defaults_apply() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "https://open.er-api.com");
        assert_eq!(config.from, CurrencyCode::Usd);
        assert_eq!(config.to, CurrencyCode::Brl);
        assert_eq!(
            config.default_pair(),
            ConversionPair::new(CurrencyCode::Usd, CurrencyCode::Brl)
        );
    }

    #[test]
    fn test_unknown_currency_in_config_is_rejected() {
        let yaml_str = r#"
from: "XYZ"
to: "BRL"
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }
}
