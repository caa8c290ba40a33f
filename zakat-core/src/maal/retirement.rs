//! # Retirement Fund Withdrawal (Zakat KWSP)
//!
//! Common practice levies the rate on the amount *withdrawn* during the
//! year, not on the full account balance. The balance is collected for
//! reference and never enters the calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementWithdrawal {
    pub withdrawn: Decimal,
    pub account_balance: Decimal,
}

impl RetirementWithdrawal {
    pub fn new(withdrawn: impl IntoZakatDecimal) -> Self {
        Self {
            withdrawn: withdrawn.into_zakat_decimal(),
            account_balance: Decimal::ZERO,
        }
    }

    pub fn with_balance(mut self, balance: impl IntoZakatDecimal) -> Self {
        self.account_balance = balance.into_zakat_decimal();
        self
    }
}

impl CalculateZakat for RetirementWithdrawal {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let base = self.withdrawn.max(Decimal::ZERO);
        let trace = vec![
            CalculationStep::info(format!("Account balance {:.2} is for reference only", self.account_balance)),
            CalculationStep::result("Amount Withdrawn", base),
        ];

        ZakatDetails::rated(WealthType::Retirement, base, Decimal::ZERO, base, config.rate, trace)
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Retirement
    }
}
