//! Persistent preview configuration.
//!
//! Loaded from `~/.config/zakat-widget/preview.toml` on Linux,
//! `~/Library/Application Support/zakat-widget/preview.toml` on macOS or
//! `%APPDATA%\zakat-widget\preview.toml` on Windows. Command-line flags win
//! over anything set here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};
use zakat_widget::WidgetConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PreviewConfig {
    pub primary: Option<String>,
    pub dark_primary: Option<String>,
    pub brand: Option<String>,
    /// Gold price per gram pre-filled in the nisab fields.
    pub gold_price: Option<String>,
    /// Fitrah rate per head pre-filled on the fitrah tab.
    pub fitrah_rate: Option<String>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl PreviewConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat-widget").join("preview.toml"))
    }

    /// Falls back to defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Self::default();
        };
        if !path.exists() {
            debug!("No preview config at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse preview config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read preview config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies the file settings on top of a widget config.
    pub fn apply(&self, mut config: WidgetConfig) -> WidgetConfig {
        if let Some(primary) = &self.primary {
            config = config.with_primary(primary);
        }
        if let Some(dark_primary) = &self.dark_primary {
            config = config.with_dark_primary(dark_primary);
        }
        if let Some(brand) = &self.brand {
            config = config.with_brand(brand.clone());
        }
        if let Some(price) = &self.gold_price {
            config = config.with_default_gold_price(price.clone());
        }
        if let Some(rate) = &self.fitrah_rate {
            config = config.with_default_fitrah_per_head(rate.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let file = PreviewConfig::parse(
            r##"
            primary = "#0055aa"
            brand = "Surau Al-Hidayah"
            gold-price = "352.10"
            enable-logging = true
            "##,
        )
        .unwrap();
        assert_eq!(file.enable_logging, Some(true));

        let config = file.apply(WidgetConfig::default());
        assert_eq!(config.primary, "#0055aa");
        assert_eq!(config.dark_primary, "#1c7a3a");
        assert_eq!(config.brand, "Surau Al-Hidayah");
        assert_eq!(config.default_gold_price, "352.10");
    }

    #[test]
    fn test_wrong_types_fail_to_parse() {
        assert!(PreviewConfig::parse("primary = 5").is_err());
        assert_eq!(PreviewConfig::parse("").unwrap(), PreviewConfig::default());
    }
}
