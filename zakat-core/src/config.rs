use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;
use crate::types::ZakatError;

/// Rate applied to the eligible amount of every rate-based category (1/40).
pub const DEFAULT_RATE: Decimal = dec!(0.025);
/// Standard gold weight used for the informational nisab threshold.
pub const DEFAULT_NISAB_GOLD_GRAMS: Decimal = dec!(85);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Arithmetic constants shared by all calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZakatConfig {
    pub rate: Decimal,
    pub nisab_gold_grams: Decimal,
    pub months_per_year: Decimal,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        ZakatConfig {
            rate: DEFAULT_RATE,
            nisab_gold_grams: DEFAULT_NISAB_GOLD_GRAMS,
            months_per_year: MONTHS_PER_YEAR,
        }
    }
}

impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<ZakatConfig>(s)
            .map(ZakatConfig::sanitized)
            .map_err(|e| ZakatError::ConfigurationError(format!("Failed to parse config JSON: {}", e)))
    }
}

impl ZakatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, rate: impl IntoZakatDecimal) -> Self {
        self.rate = rate.into_zakat_decimal();
        self
    }

    pub fn with_nisab_gold_grams(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.nisab_gold_grams = grams.into_zakat_decimal();
        self
    }

    /// Clamps values deserialized from untrusted JSON. Negative values become
    /// zero and a zero falls back to the default.
    pub fn sanitized(self) -> Self {
        let positive_or = |value: Decimal, fallback: Decimal| {
            let value = value.into_zakat_decimal();
            if value.is_zero() {
                tracing::warn!("Ignoring non-positive config value {}, using {}", value, fallback);
                fallback
            } else {
                value
            }
        };
        ZakatConfig {
            rate: positive_or(self.rate, DEFAULT_RATE),
            nisab_gold_grams: positive_or(self.nisab_gold_grams, DEFAULT_NISAB_GOLD_GRAMS),
            months_per_year: positive_or(self.months_per_year, MONTHS_PER_YEAR),
        }
    }
}
