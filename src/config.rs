use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zakat_core::config::ZakatConfig;
use zakat_i18n::ZakatLocale;

pub const DEFAULT_PRIMARY: &str = "#249749";
pub const DEFAULT_DARK_PRIMARY: &str = "#1c7a3a";
pub const DEFAULT_STORAGE_KEY: &str = "iaZakatState";
pub const DEFAULT_QUERY_PARAM: &str = "tab";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to parse widget config: {0}")]
    Parse(String),
}

/// Presentation and persistence settings for one mounted widget.
///
/// Colours arrive from page attributes and end up inside a stylesheet, so
/// they are sanitized on every path in; anything suspicious falls back to the
/// brand defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub primary: String,
    pub dark_primary: String,
    pub brand: String,
    pub currency: String,
    pub locale: ZakatLocale,
    /// Gold price (RM/gram) pre-filled before the user enters one.
    pub default_gold_price: String,
    pub default_fitrah_per_head: String,
    pub version: String,
    pub storage_key: String,
    pub query_param: String,
    /// Year shown in the footer.
    pub year: i32,
    pub zakat: ZakatConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY.to_string(),
            dark_primary: DEFAULT_DARK_PRIMARY.to_string(),
            brand: "IlmuAlam".to_string(),
            currency: "MYR".to_string(),
            locale: ZakatLocale::default(),
            default_gold_price: String::new(),
            default_fitrah_per_head: String::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            year: chrono::Local::now().year(),
            zakat: ZakatConfig::default(),
        }
    }
}

impl FromStr for WidgetConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: WidgetConfig = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config.sanitized())
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from the `primary` / `dark-primary` element attributes.
    pub fn from_attributes(primary: Option<&str>, dark_primary: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(primary) = primary {
            config = config.with_primary(primary);
        }
        if let Some(dark_primary) = dark_primary {
            config = config.with_dark_primary(dark_primary);
        }
        config
    }

    pub fn with_primary(mut self, colour: impl AsRef<str>) -> Self {
        self.primary = sanitize_colour(colour.as_ref(), DEFAULT_PRIMARY);
        self
    }

    pub fn with_dark_primary(mut self, colour: impl AsRef<str>) -> Self {
        self.dark_primary = sanitize_colour(colour.as_ref(), DEFAULT_DARK_PRIMARY);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_locale(mut self, locale: ZakatLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_default_gold_price(mut self, price: impl Into<String>) -> Self {
        self.default_gold_price = price.into();
        self
    }

    pub fn with_default_fitrah_per_head(mut self, rate: impl Into<String>) -> Self {
        self.default_fitrah_per_head = rate.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param = name.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_zakat(mut self, zakat: ZakatConfig) -> Self {
        self.zakat = zakat;
        self
    }

    /// Re-applies colour sanitizing, restores empty keys to their defaults and
    /// clamps the calculator constants.
    /// Used after deserializing from untrusted JSON.
    pub fn sanitized(mut self) -> Self {
        self.primary = sanitize_colour(&self.primary, DEFAULT_PRIMARY);
        self.dark_primary = sanitize_colour(&self.dark_primary, DEFAULT_DARK_PRIMARY);
        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        if self.query_param.trim().is_empty() {
            self.query_param = DEFAULT_QUERY_PARAM.to_string();
        }
        self.zakat = self.zakat.sanitized();
        self
    }
}

/// Accepts hex, named and functional colours (`rgb(…)`, `hsl(…)`); anything
/// carrying characters that could close the declaration is replaced.
fn sanitize_colour(raw: &str, fallback: &str) -> String {
    let colour = raw.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || "#(),.% ".contains(c);
    if colour.is_empty() || colour.len() > 64 || !colour.chars().all(allowed) {
        if !colour.is_empty() {
            tracing::warn!("Ignoring unsafe colour value {:?}", raw);
        }
        return fallback.to_string();
    }
    colour.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.primary, "#249749");
        assert_eq!(config.dark_primary, "#1c7a3a");
        assert_eq!(config.brand, "IlmuAlam");
        assert_eq!(config.storage_key, "iaZakatState");
        assert_eq!(config.query_param, "tab");
        assert_eq!(config.version, "1.0.0");
        assert!(config.default_gold_price.is_empty());
    }

    #[test]
    fn test_attributes_are_sanitized() {
        let config = WidgetConfig::from_attributes(Some("rgb(10, 20, 30)"), Some("red;}</style>"));
        assert_eq!(config.primary, "rgb(10, 20, 30)");
        assert_eq!(config.dark_primary, DEFAULT_DARK_PRIMARY);

        let config = WidgetConfig::from_attributes(None, Some("  "));
        assert_eq!(config.primary, DEFAULT_PRIMARY);
        assert_eq!(config.dark_primary, DEFAULT_DARK_PRIMARY);
    }

    #[test]
    fn test_json_config() {
        let config: WidgetConfig = r##"{"primary":"#0055aa","brand":"Masjid","defaultFitrahPerHead":"7","storageKey":""}"##
            .parse()
            .unwrap();
        assert_eq!(config.primary, "#0055aa");
        assert_eq!(config.brand, "Masjid");
        assert_eq!(config.default_fitrah_per_head, "7");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.dark_primary, DEFAULT_DARK_PRIMARY);

        assert!("{not json".parse::<WidgetConfig>().is_err());
    }

    #[test]
    fn test_json_calculator_constants_are_clamped() {
        let config: WidgetConfig = r#"{"zakat":{"rate":-0.5,"monthsPerYear":-12}}"#.parse().unwrap();
        assert_eq!(config.zakat, ZakatConfig::default());
    }
}
