//! # Nisab (Minimum Threshold)
//!
//! Nisab is the value of a reference quantity of gold (85 grams by default)
//! at the current price. The widget shows it for guidance only; none of the
//! calculators gate their payable amount on it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;

/// Returns `price_per_gram × grams`, or zero when either side is not positive.
pub fn nisab_threshold(price_per_gram: impl IntoZakatDecimal, grams: impl IntoZakatDecimal) -> Decimal {
    let price = price_per_gram.into_zakat_decimal();
    let grams = grams.into_zakat_decimal();
    if price <= Decimal::ZERO || grams <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    price.saturating_mul(grams)
}

/// Reference inputs for the threshold, as shown on the info tab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NisabReference {
    pub price_per_gram: Decimal,
    pub grams: Decimal,
}

impl NisabReference {
    pub fn new(price_per_gram: impl IntoZakatDecimal, grams: impl IntoZakatDecimal) -> Self {
        Self {
            price_per_gram: price_per_gram.into_zakat_decimal(),
            grams: grams.into_zakat_decimal(),
        }
    }

    pub fn threshold(&self) -> Decimal {
        nisab_threshold(self.price_per_gram, self.grams)
    }

    /// Whether `amount` reaches the threshold. Informational only.
    pub fn is_reached_by(&self, amount: Decimal) -> bool {
        let threshold = self.threshold();
        threshold > Decimal::ZERO && amount >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_threshold_is_price_times_grams() {
        assert_eq!(nisab_threshold(dec!(350), dec!(85)), dec!(29750));
        assert_eq!(nisab_threshold("350", "85"), dec!(29750));
    }

    #[test]
    fn test_non_positive_inputs_yield_zero() {
        assert_eq!(nisab_threshold(dec!(0), dec!(85)), Decimal::ZERO);
        assert_eq!(nisab_threshold(dec!(350), dec!(0)), Decimal::ZERO);
        assert_eq!(nisab_threshold(-350, 85), Decimal::ZERO);
        assert_eq!(nisab_threshold("", "85"), Decimal::ZERO);
    }

    #[test]
    fn test_threshold_saturates() {
        assert_eq!(nisab_threshold(Decimal::MAX, dec!(2)), Decimal::MAX);
    }

    #[test]
    fn test_reference_reached() {
        let reference = NisabReference::new(350, 85);
        assert!(reference.is_reached_by(dec!(29750)));
        assert!(!reference.is_reached_by(dec!(29749.99)));
        assert!(!NisabReference::new(0, 85).is_reached_by(dec!(1000)));
    }
}
