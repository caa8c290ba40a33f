//! Input normalization.
//!
//! Every figure the calculators see passes through [`parse_amount`] or
//! [`IntoZakatDecimal`]. Nothing here fails: empty, malformed, negative or
//! out-of-range input becomes zero.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Currency marker accepted (and ignored) in front of an amount.
pub const CURRENCY_PREFIX: &str = "RM";

/// Parses a raw field value into a non-negative decimal.
///
/// Grouping separators (`,`), whitespace and a leading `RM` are stripped,
/// then the longest numeric prefix is read the way `parseFloat` does, so
/// `"12kg"` is 12 and `"abc"` is 0.
///
/// ```
/// use rust_decimal_macros::dec;
/// use zakat_core::inputs::parse_amount;
///
/// assert_eq!(parse_amount("RM 1,234.50"), dec!(1234.5));
/// assert_eq!(parse_amount(" -20 "), dec!(0));
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let compact: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let unprefixed = strip_currency_prefix(&compact);
    let Some(literal) = numeric_prefix(unprefixed) else {
        return Decimal::ZERO;
    };

    let parsed = if literal.contains(['e', 'E']) {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };

    match parsed {
        Ok(value) if value > Decimal::ZERO => value.normalize(),
        Ok(_) => Decimal::ZERO,
        Err(e) => {
            tracing::debug!("Treating unparseable amount {:?} as zero: {}", raw, e);
            Decimal::ZERO
        }
    }
}

fn strip_currency_prefix(s: &str) -> &str {
    match s.get(..CURRENCY_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(CURRENCY_PREFIX) => &s[CURRENCY_PREFIX.len()..],
        _ => s,
    }
}

/// Extracts the leading `[sign] digits [. digits] [e [sign] digits]` literal,
/// normalized so `rust_decimal` accepts it (`.5` → `0.5`, `5.` → `5`).
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut literal = String::new();

    if let Some(sign @ (b'+' | b'-')) = bytes.first() {
        if *sign == b'-' {
            literal.push('-');
        }
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            literal.push('e');
            literal.push_str(&s[i + 1..j]);
        }
    }

    Some(literal)
}

/// Trait for converting various types into a non-negative `Decimal`.
///
/// This lets calculator setters take `i32`, `f64`, `&str`, etc. directly
/// without wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Decimal;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Decimal {
        self.max(Decimal::ZERO)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                #[allow(unused_comparisons)]
                fn into_zakat_decimal(self) -> Decimal {
                    if self < 0 { Decimal::ZERO } else { Decimal::from(self) }
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Decimal {
                    Decimal::from_f64_retain(self as f64)
                        .map(|d| d.max(Decimal::ZERO))
                        .unwrap_or(Decimal::ZERO)
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Decimal {
        parse_amount(self)
    }
}

impl IntoZakatDecimal for &String {
    fn into_zakat_decimal(self) -> Decimal {
        parse_amount(self)
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Decimal {
        parse_amount(&self)
    }
}

impl<T: IntoZakatDecimal> IntoZakatDecimal for Option<T> {
    fn into_zakat_decimal(self) -> Decimal {
        self.map(IntoZakatDecimal::into_zakat_decimal).unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_amount("5000"), dec!(5000));
        assert_eq!(parse_amount("3.5"), dec!(3.5));
        assert_eq!(parse_amount(".5"), dec!(0.5));
        assert_eq!(parse_amount("7."), dec!(7));
        assert_eq!(parse_amount("+12"), dec!(12));
    }

    #[test]
    fn test_grouping_and_whitespace_are_stripped() {
        assert_eq!(parse_amount(" 1,234,567.89 "), dec!(1234567.89));
        assert_eq!(parse_amount("1 000"), dec!(1000));
        assert_eq!(parse_amount("1\u{a0}000"), dec!(1000));
    }

    #[test]
    fn test_currency_prefix_is_ignored() {
        assert_eq!(parse_amount("RM 1,234.50"), dec!(1234.5));
        assert_eq!(parse_amount("rm12"), dec!(12));
    }

    #[test]
    fn test_leading_prefix_like_parse_float() {
        assert_eq!(parse_amount("12kg"), dec!(12));
        assert_eq!(parse_amount("1.5.6"), dec!(1.5));
        assert_eq!(parse_amount("2e3"), dec!(2000));
        assert_eq!(parse_amount("2e"), dec!(2));
        assert_eq!(parse_amount("1.5E-1"), dec!(0.15));
    }

    #[test]
    fn test_invalid_and_negative_become_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("-250"), Decimal::ZERO);
        assert_eq!(parse_amount("Infinity"), Decimal::ZERO);
        assert_eq!(parse_amount("1e400"), Decimal::ZERO);
    }

    #[test]
    fn test_into_zakat_decimal_clamps() {
        assert_eq!((-5).into_zakat_decimal(), Decimal::ZERO);
        assert_eq!(7u32.into_zakat_decimal(), dec!(7));
        assert_eq!(f64::NAN.into_zakat_decimal(), Decimal::ZERO);
        assert_eq!((-1.5f64).into_zakat_decimal(), Decimal::ZERO);
        assert_eq!(dec!(-3).into_zakat_decimal(), Decimal::ZERO);
        assert_eq!(None::<&str>.into_zakat_decimal(), Decimal::ZERO);
        assert_eq!(Some("42").into_zakat_decimal(), dec!(42));
    }
}
