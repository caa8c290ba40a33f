//! # Savings (Zakat Simpanan)
//!
//! Cash and liquid balances held at the end of the haul are summed and the
//! rate applied to the total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAssets {
    pub cash: Decimal,
    pub bank_balance: Decimal,
    pub fixed_deposit: Decimal,
    pub other_liquid: Decimal,
}

impl SavingsAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cash(mut self, cash: impl IntoZakatDecimal) -> Self {
        self.cash = cash.into_zakat_decimal();
        self
    }

    pub fn bank(mut self, balance: impl IntoZakatDecimal) -> Self {
        self.bank_balance = balance.into_zakat_decimal();
        self
    }

    pub fn fixed_deposit(mut self, deposit: impl IntoZakatDecimal) -> Self {
        self.fixed_deposit = deposit.into_zakat_decimal();
        self
    }

    pub fn other(mut self, other: impl IntoZakatDecimal) -> Self {
        self.other_liquid = other.into_zakat_decimal();
        self
    }
}

impl CalculateZakat for SavingsAssets {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let total = [self.cash, self.bank_balance, self.fixed_deposit, self.other_liquid]
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
            .ok_or_else(|| ZakatError::overflow("summing savings", WealthType::Savings))?;

        let trace = vec![
            CalculationStep::initial("Cash", self.cash),
            CalculationStep::add("Bank Balance", self.bank_balance),
            CalculationStep::add("Fixed Deposit", self.fixed_deposit),
            CalculationStep::add("Other Liquid Savings", self.other_liquid),
            CalculationStep::result("Total Savings", total),
        ];

        ZakatDetails::rated(WealthType::Savings, total, Decimal::ZERO, total, config.rate, trace)
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Savings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_savings_sum() {
        let res = SavingsAssets::new()
            .cash(800)
            .bank(5000)
            .fixed_deposit(3000)
            .other("")
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(8800));
        assert_eq!(res.zakat_due, Some(dec!(220)));
    }

    #[test]
    fn test_empty_savings_pay_nothing() {
        let res = SavingsAssets::new().calculate_zakat(&ZakatConfig::default()).unwrap();
        assert_eq!(res.amount_due(), Decimal::ZERO);
    }

    #[test]
    fn test_overflow_degrades_to_zero() {
        let assets = SavingsAssets::new().cash(Decimal::MAX).bank(Decimal::MAX);
        assert!(assets.calculate_zakat(&ZakatConfig::default()).is_err());
        assert_eq!(assets.calculate_or_zero(&ZakatConfig::default()).amount_due(), Decimal::ZERO);
    }
}
