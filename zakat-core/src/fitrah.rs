use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

/// Zakat Fitrah: a flat amount per dependant (including oneself).
///
/// The per-head rate is set yearly by each state's religious council. When
/// no explicit rate is entered the shared default rate is used.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitrahCalculator {
    pub heads: Decimal,
    pub rate_per_head: Decimal,
    pub fallback_rate: Decimal,
}

impl FitrahCalculator {
    pub fn new(heads: impl IntoZakatDecimal) -> Self {
        Self {
            heads: heads.into_zakat_decimal(),
            ..Default::default()
        }
    }

    pub fn rate(mut self, rate_per_head: impl IntoZakatDecimal) -> Self {
        self.rate_per_head = rate_per_head.into_zakat_decimal();
        self
    }

    pub fn fallback_rate(mut self, rate_per_head: impl IntoZakatDecimal) -> Self {
        self.fallback_rate = rate_per_head.into_zakat_decimal();
        self
    }

    /// The explicit rate, or the fallback when the explicit one is zero.
    pub fn effective_rate(&self) -> Decimal {
        if self.rate_per_head > Decimal::ZERO {
            self.rate_per_head
        } else {
            self.fallback_rate
        }
    }
}

impl CalculateZakat for FitrahCalculator {
    /// Fitrah carries no percentage rate; the total is the amount to pay.
    fn calculate_zakat(&self, _config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let rate = self.effective_rate();
        let total = self
            .heads
            .checked_mul(rate)
            .ok_or_else(|| ZakatError::overflow("multiplying heads by rate", WealthType::Fitrah))?;

        let trace = vec![
            CalculationStep::initial("Dependants", self.heads),
            CalculationStep::multiply("Rate per Head", rate),
            CalculationStep::result("Total Fitrah", total),
        ];

        Ok(ZakatDetails::flat(WealthType::Fitrah, total, trace))
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Fitrah
    }
}

/// Calculates Zakat Fitrah for `heads` people at `rate_per_head`.
pub fn calculate_fitrah(
    heads: impl IntoZakatDecimal,
    rate_per_head: impl IntoZakatDecimal,
) -> Result<ZakatDetails, ZakatError> {
    FitrahCalculator::new(heads)
        .rate(rate_per_head)
        .calculate_zakat(&ZakatConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fitrah_basic() {
        let result = calculate_fitrah(5, 7).unwrap();
        assert_eq!(result.eligible_amount, dec!(35));
        assert_eq!(result.zakat_due, None);
        assert_eq!(result.format_amount(), "35.00");
    }

    #[test]
    fn test_fallback_rate_used_when_explicit_empty() {
        let result = FitrahCalculator::new("4")
            .rate("")
            .fallback_rate("7.50")
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(result.amount_due(), dec!(30));
    }

    #[test]
    fn test_explicit_rate_wins() {
        let calc = FitrahCalculator::new(2).rate(8).fallback_rate(7);
        assert_eq!(calc.effective_rate(), dec!(8));
    }

    #[test]
    fn test_no_heads_no_fee() {
        let result = calculate_fitrah("", 7).unwrap();
        assert_eq!(result.amount_due(), Decimal::ZERO);
    }
}
