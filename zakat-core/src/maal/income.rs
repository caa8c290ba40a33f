//! # Professional Income (Zakat Pendapatan)
//!
//! ## Calculation Methods
//! - **Net** (recommended): deduct mandatory contributions (EPF, SOCSO, tax),
//!   basic needs and obligatory debts/maintenance before applying the rate.
//! - **Savings approach**: deduct only mandatory contributions.
//!
//! Monthly figures are annualized (× 12) before the rate is applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr)]
pub enum IncomePeriod {
    #[default]
    #[strum(serialize = "bulan")]
    Monthly,
    #[strum(serialize = "tahun")]
    Yearly,
}

impl IncomePeriod {
    /// Reads a form value; anything other than the monthly id is yearly,
    /// and an empty value is the monthly default.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "" => Self::default(),
            v if v == Self::Monthly.as_ref() => Self::Monthly,
            _ => Self::Yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr)]
pub enum IncomeBasis {
    #[default]
    #[strum(serialize = "net")]
    Net,
    #[strum(serialize = "simpanan")]
    Savings,
}

impl IncomeBasis {
    /// Reads a form value; only the net id selects the net basis, an empty
    /// value is the net default.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "" => Self::default(),
            v if v == Self::Net.as_ref() => Self::Net,
            _ => Self::Savings,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeZakatCalculator {
    pub gross_income: Decimal,
    pub mandatory_deductions: Decimal,
    pub essential_expenses: Decimal,
    pub other_obligations: Decimal,
    pub period: IncomePeriod,
    pub basis: IncomeBasis,
}

impl IncomeZakatCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gross(mut self, income: impl IntoZakatDecimal) -> Self {
        self.gross_income = income.into_zakat_decimal();
        self
    }

    pub fn mandatory(mut self, deductions: impl IntoZakatDecimal) -> Self {
        self.mandatory_deductions = deductions.into_zakat_decimal();
        self
    }

    pub fn essentials(mut self, expenses: impl IntoZakatDecimal) -> Self {
        self.essential_expenses = expenses.into_zakat_decimal();
        self
    }

    pub fn other(mut self, obligations: impl IntoZakatDecimal) -> Self {
        self.other_obligations = obligations.into_zakat_decimal();
        self
    }

    pub fn period(mut self, period: IncomePeriod) -> Self {
        self.period = period;
        self
    }

    pub fn basis(mut self, basis: IncomeBasis) -> Self {
        self.basis = basis;
        self
    }
}

impl CalculateZakat for IncomeZakatCalculator {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let overflow = |op: &str| ZakatError::overflow(op, WealthType::Income);

        let mut trace = vec![
            CalculationStep::initial("Gross Income", self.gross_income),
            CalculationStep::subtract("Mandatory Deductions", self.mandatory_deductions),
        ];

        let deductions = match self.basis {
            IncomeBasis::Net => {
                trace.push(CalculationStep::subtract("Essential Expenses", self.essential_expenses));
                trace.push(CalculationStep::subtract("Other Obligations", self.other_obligations));
                self.mandatory_deductions
                    .checked_add(self.essential_expenses)
                    .and_then(|d| d.checked_add(self.other_obligations))
                    .ok_or_else(|| overflow("summing deductions"))?
            }
            IncomeBasis::Savings => self.mandatory_deductions,
        };

        let net = (self.gross_income - deductions).max(Decimal::ZERO);
        trace.push(CalculationStep::clamp("Net Income (not below zero)", net));

        let (total_assets, deductions, eligible) = match self.period {
            IncomePeriod::Monthly => {
                let months = config.months_per_year;
                trace.push(CalculationStep::multiply("Months per Year", months));
                let annualize = |v: Decimal| v.checked_mul(months).ok_or_else(|| overflow("annualizing income"));
                (annualize(self.gross_income)?, annualize(deductions)?, annualize(net)?)
            }
            IncomePeriod::Yearly => (self.gross_income, deductions, net),
        };
        trace.push(CalculationStep::result("Eligible Income (yearly)", eligible));

        ZakatDetails::rated(WealthType::Income, total_assets, deductions, eligible, config.rate, trace)
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Income
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> IncomeZakatCalculator {
        IncomeZakatCalculator::new()
            .gross(5000)
            .mandatory(800)
            .essentials(1500)
            .other(400)
    }

    #[test]
    fn test_net_monthly() {
        // (5000 - 800 - 1500 - 400) = 2300/month -> 27600/year -> 690
        let res = sample().calculate_zakat(&ZakatConfig::default()).unwrap();
        assert_eq!(res.eligible_amount, dec!(27600));
        assert_eq!(res.zakat_due, Some(dec!(690)));
        assert_eq!(res.format_amount(), "690.00");
    }

    #[test]
    fn test_savings_basis_only_deducts_mandatory() {
        let res = sample()
            .basis(IncomeBasis::Savings)
            .period(IncomePeriod::Yearly)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(4200));
        assert_eq!(res.zakat_due, Some(dec!(105)));
    }

    #[test]
    fn test_deductions_exceeding_income_clamp_to_zero() {
        let res = IncomeZakatCalculator::new()
            .gross(1000)
            .mandatory(800)
            .essentials(1500)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, Decimal::ZERO);
        assert_eq!(res.zakat_due, Some(Decimal::ZERO));
    }

    #[test]
    fn test_form_values() {
        assert_eq!(IncomePeriod::from_form_value(""), IncomePeriod::Monthly);
        assert_eq!(IncomePeriod::from_form_value("bulan"), IncomePeriod::Monthly);
        assert_eq!(IncomePeriod::from_form_value("tahun"), IncomePeriod::Yearly);
        assert_eq!(IncomeBasis::from_form_value("net"), IncomeBasis::Net);
        assert_eq!(IncomeBasis::from_form_value("simpanan"), IncomeBasis::Savings);
        assert_eq!(IncomeBasis::from_form_value("other"), IncomeBasis::Savings);
    }
}
