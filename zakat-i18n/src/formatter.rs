use std::str::FromStr;

use fixed_decimal::FixedDecimal;
use icu::decimal::{FixedDecimalFormatter, options::FixedDecimalFormatterOptions};
use icu::locid::Locale;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use writeable::Writeable;

/// Locale the widget renders amounts and text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ZakatLocale {
    #[default]
    #[serde(rename = "ms-MY")]
    MsMY,
}

impl ZakatLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZakatLocale::MsMY => "ms-MY",
        }
    }

    pub fn to_icu_locale(&self) -> Option<Locale> {
        self.as_str().parse().ok()
    }

    pub fn currency_code(&self) -> &'static str {
        match self {
            ZakatLocale::MsMY => "MYR",
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            ZakatLocale::MsMY => "RM",
        }
    }
}

impl FromStr for ZakatLocale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms-MY" | "ms" => Ok(ZakatLocale::MsMY),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

/// Renders amounts as `RM 1,234.50`.
///
/// Grouping comes from ICU4X compiled data. When the ICU formatter cannot be
/// built the formatter falls back to an ungrouped `RM 1234.50`.
pub struct CurrencyFormatter {
    locale: ZakatLocale,
    decimal: Option<FixedDecimalFormatter>,
}

impl std::fmt::Debug for CurrencyFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyFormatter")
            .field("locale", &self.locale)
            .field("icu", &self.decimal.is_some())
            .finish()
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(ZakatLocale::default())
    }
}

impl CurrencyFormatter {
    pub fn new(locale: ZakatLocale) -> Self {
        let decimal = locale.to_icu_locale().and_then(|locale| {
            FixedDecimalFormatter::try_new(&locale.into(), FixedDecimalFormatterOptions::default())
                .map_err(|e| tracing::warn!("ICU decimal formatter unavailable, using plain format: {}", e))
                .ok()
        });
        Self { locale, decimal }
    }

    /// A formatter that always uses the plain fallback rendering.
    pub fn plain(locale: ZakatLocale) -> Self {
        Self { locale, decimal: None }
    }

    pub fn locale(&self) -> ZakatLocale {
        self.locale
    }

    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let fixed = format!("{:.2}", rounded);
        let symbol = self.locale.currency_symbol();

        let grouped = self.decimal.as_ref().and_then(|formatter| {
            let value = FixedDecimal::from_str(&fixed).ok()?;
            Some(formatter.format(&value).write_to_string().into_owned())
        });

        match grouped {
            Some(number) => format!("{} {}", symbol, number),
            None => format!("{} {}", symbol, fixed),
        }
    }

    /// Formats an optional amount; a missing value renders as zero.
    pub fn format_opt(&self, amount: Option<Decimal>) -> String {
        self.format(amount.unwrap_or(Decimal::ZERO))
    }
}
