//! # Investments (Zakat Pelaburan)
//!
//! Unit trusts (ASB), Tabung Haji savings, listed shares, crypto and other
//! investments are valued at their current market value and summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAssets {
    /// Amanah Saham Bumiputera and similar unit trusts.
    pub unit_trust: Decimal,
    /// Tabung Haji (pilgrimage fund) balance.
    pub pilgrimage_fund: Decimal,
    pub stocks: Decimal,
    pub crypto: Decimal,
    pub other: Decimal,
}

impl InvestmentAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_trust(mut self, value: impl IntoZakatDecimal) -> Self {
        self.unit_trust = value.into_zakat_decimal();
        self
    }

    pub fn pilgrimage_fund(mut self, value: impl IntoZakatDecimal) -> Self {
        self.pilgrimage_fund = value.into_zakat_decimal();
        self
    }

    pub fn stocks(mut self, value: impl IntoZakatDecimal) -> Self {
        self.stocks = value.into_zakat_decimal();
        self
    }

    pub fn crypto(mut self, value: impl IntoZakatDecimal) -> Self {
        self.crypto = value.into_zakat_decimal();
        self
    }

    pub fn other(mut self, value: impl IntoZakatDecimal) -> Self {
        self.other = value.into_zakat_decimal();
        self
    }
}

impl CalculateZakat for InvestmentAssets {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let holdings = [
            ("Unit Trust (ASB)", self.unit_trust),
            ("Tabung Haji", self.pilgrimage_fund),
            ("Stocks", self.stocks),
            ("Crypto", self.crypto),
            ("Other Investments", self.other),
        ];

        let mut trace = Vec::with_capacity(holdings.len() + 1);
        let mut total = Decimal::ZERO;
        for (i, (label, value)) in holdings.into_iter().enumerate() {
            total = total
                .checked_add(value)
                .ok_or_else(|| ZakatError::overflow("summing investments", WealthType::Investment))?;
            trace.push(if i == 0 {
                CalculationStep::initial(label, value)
            } else {
                CalculationStep::add(label, value)
            });
        }
        trace.push(CalculationStep::result("Total Investments", total));

        ZakatDetails::rated(WealthType::Investment, total, Decimal::ZERO, total, config.rate, trace)
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Investment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_of_five_balances() {
        let res = InvestmentAssets::new()
            .unit_trust(10000)
            .pilgrimage_fund(8000)
            .stocks(6000)
            .crypto("1,000")
            .other(-50)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(25000));
        assert_eq!(res.zakat_due, Some(dec!(625)));
        assert_eq!(res.calculation_trace.len(), 8);
    }
}
