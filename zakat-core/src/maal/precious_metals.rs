//! # Gold & Silver (Zakat Emas/Perak)
//!
//! ## Gold
//! - Stored gold is fully zakatable.
//! - Worn gold is zakatable only above the locally customary allowance
//!   (*uruf*), which varies by state fatwa and is entered by the user.
//!
//! ## Silver
//! - Weight × price, no allowance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, WealthType, ZakatDetails, ZakatError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreciousMetals {
    pub gold_kept_grams: Decimal,
    pub gold_worn_grams: Decimal,
    /// Worn weight exempt under *uruf*.
    pub exempt_grams: Decimal,
    pub gold_price_per_gram: Decimal,
    pub silver_grams: Decimal,
    pub silver_price_per_gram: Decimal,
}

impl PreciousMetals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kept(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.gold_kept_grams = grams.into_zakat_decimal();
        self
    }

    pub fn worn(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.gold_worn_grams = grams.into_zakat_decimal();
        self
    }

    pub fn exempt(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.exempt_grams = grams.into_zakat_decimal();
        self
    }

    pub fn gold_price(mut self, price_per_gram: impl IntoZakatDecimal) -> Self {
        self.gold_price_per_gram = price_per_gram.into_zakat_decimal();
        self
    }

    pub fn silver(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.silver_grams = grams.into_zakat_decimal();
        self
    }

    pub fn silver_price(mut self, price_per_gram: impl IntoZakatDecimal) -> Self {
        self.silver_price_per_gram = price_per_gram.into_zakat_decimal();
        self
    }
}

impl CalculateZakat for PreciousMetals {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let overflow = |op: &str| ZakatError::overflow(op, WealthType::PreciousMetals);

        let worn_zakatable = (self.gold_worn_grams - self.exempt_grams).max(Decimal::ZERO);
        let gold_grams = self
            .gold_kept_grams
            .checked_add(worn_zakatable)
            .ok_or_else(|| overflow("summing gold weight"))?;
        let gold_value = gold_grams
            .checked_mul(self.gold_price_per_gram)
            .ok_or_else(|| overflow("valuing gold"))?
            .max(Decimal::ZERO);
        let silver_value = self
            .silver_grams
            .checked_mul(self.silver_price_per_gram)
            .ok_or_else(|| overflow("valuing silver"))?;
        let total = gold_value
            .checked_add(silver_value)
            .ok_or_else(|| overflow("summing metal value"))?;

        let trace = vec![
            CalculationStep::initial("Gold Kept (grams)", self.gold_kept_grams),
            CalculationStep::add("Gold Worn (grams)", self.gold_worn_grams),
            CalculationStep::subtract("Uruf Allowance (grams)", self.gold_worn_grams - worn_zakatable),
            CalculationStep::result("Zakatable Gold (grams)", gold_grams),
            CalculationStep::multiply("Gold Price per Gram", self.gold_price_per_gram),
            CalculationStep::result("Gold Value", gold_value),
            CalculationStep::add("Silver Value", silver_value),
            CalculationStep::result("Total Metal Value", total),
        ];

        ZakatDetails::rated(WealthType::PreciousMetals, total, Decimal::ZERO, total, config.rate, trace)
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::PreciousMetals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kept_and_worn_gold() {
        // (30 + 50) * 350 = 28000 -> 700
        let res = PreciousMetals::new()
            .kept(30)
            .worn(50)
            .exempt(0)
            .gold_price(350)
            .silver(0)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(28000));
        assert_eq!(res.zakat_due, Some(dec!(700)));
    }

    #[test]
    fn test_uruf_allowance_never_goes_negative() {
        // Worn 20g under a 50g allowance contributes nothing.
        let res = PreciousMetals::new()
            .kept(10)
            .worn(20)
            .exempt(50)
            .gold_price(100)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(1000));
    }

    #[test]
    fn test_silver_added_to_gold() {
        let res = PreciousMetals::new()
            .kept(10)
            .gold_price(300)
            .silver(100)
            .silver_price(3.5)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.eligible_amount, dec!(3350));
        assert_eq!(res.zakat_due, Some(dec!(83.75)));
    }

    #[test]
    fn test_no_price_means_no_value() {
        let res = PreciousMetals::new()
            .kept(100)
            .calculate_zakat(&ZakatConfig::default())
            .unwrap();
        assert_eq!(res.amount_due(), Decimal::ZERO);
    }
}
