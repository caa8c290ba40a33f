//! # Business (Zakat Perniagaan)
//!
//! Working capital method: current assets (cash, stock, receivables, liquid
//! investments) less short-term liabilities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessAssets {
    pub current_assets: Decimal,
    pub current_liabilities: Decimal,
}

impl BusinessAssets {
    pub fn new(current_assets: impl IntoZakatDecimal, current_liabilities: impl IntoZakatDecimal) -> Self {
        Self {
            current_assets: current_assets.into_zakat_decimal(),
            current_liabilities: current_liabilities.into_zakat_decimal(),
        }
    }
}

impl CalculateZakat for BusinessAssets {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let working_capital = (self.current_assets - self.current_liabilities).max(Decimal::ZERO);

        let trace = vec![
            CalculationStep::initial("Current Assets", self.current_assets),
            CalculationStep::subtract("Current Liabilities", self.current_liabilities),
            CalculationStep::clamp("Working Capital (not below zero)", working_capital),
        ];

        ZakatDetails::rated(
            WealthType::Business,
            self.current_assets,
            self.current_liabilities,
            working_capital,
            config.rate,
            trace,
        )
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Business
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_business_zakat() {
        let res = BusinessAssets::new(120000, 50000)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(70000));
        assert_eq!(res.zakat_due, Some(dec!(1750)));
    }

    #[test]
    fn test_liabilities_exceed_assets() {
        let res = BusinessAssets::new(10000, 25000)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, Decimal::ZERO);
        assert_eq!(res.zakat_due, Some(Decimal::ZERO));
    }
}
