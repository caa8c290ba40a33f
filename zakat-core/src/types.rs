use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use thiserror::Error;

/// The kind of operation a [`CalculationStep`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Multiply,
    Clamp,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply | Operation::Rate => "x",
            Operation::Clamp => "^",
            Operation::Result => "=",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// This struct provides transparency into how the final amount was derived,
/// so the widget can explain each figure it shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(operation: Operation, description: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Initial, description, Some(amount))
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Add, description, Some(amount))
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Subtract, description, Some(amount))
    }

    pub fn multiply(description: impl Into<String>, factor: Decimal) -> Self {
        Self::with(Operation::Multiply, description, Some(factor))
    }

    pub fn clamp(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Clamp, description, Some(amount))
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(Operation::Rate, description, Some(rate))
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Result, description, Some(amount))
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(Operation::Info, description, None)
    }
}

/// Category of wealth a calculation was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter)]
pub enum WealthType {
    Income,
    Savings,
    PreciousMetals,
    Business,
    Investment,
    Retirement,
    Fitrah,
}

impl WealthType {
    /// Whether the payable amount is derived with the percentage rate.
    /// Fitrah is a flat per-head fee instead.
    pub fn is_rate_based(&self) -> bool {
        !matches!(self, WealthType::Fitrah)
    }
}

/// Represents the detailed breakdown of a single category calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZakatDetails {
    /// The type of wealth this calculation is for.
    pub wealth_type: WealthType,
    /// Gross value before category-specific deductions.
    pub total_assets: Decimal,
    /// Sum of everything deducted from `total_assets`.
    pub deductions: Decimal,
    /// The determined value subject to the rate (never negative).
    pub eligible_amount: Decimal,
    /// Rate applied to `eligible_amount`, `None` for flat fees.
    pub rate: Option<Decimal>,
    /// Payable amount. `None` when the eligible amount is itself the total.
    pub zakat_due: Option<Decimal>,
    /// Step-by-step trace of how this calculation was derived.
    pub calculation_trace: Vec<CalculationStep>,
}

impl ZakatDetails {
    /// Builds a rate-based result. The payable amount is `eligible × rate`
    /// whenever the eligible amount is positive, and zero otherwise.
    pub fn rated(
        wealth_type: WealthType,
        total_assets: Decimal,
        deductions: Decimal,
        eligible_amount: Decimal,
        rate: Decimal,
        mut trace: Vec<CalculationStep>,
    ) -> Result<Self, ZakatError> {
        let zakat_due = if eligible_amount > Decimal::ZERO {
            eligible_amount
                .checked_mul(rate)
                .ok_or_else(|| ZakatError::overflow("applying rate", wealth_type))?
        } else {
            Decimal::ZERO
        };

        trace.push(CalculationStep::rate("Applied Rate", rate));
        trace.push(CalculationStep::result("Zakat Due", zakat_due));

        Ok(Self {
            wealth_type,
            total_assets,
            deductions,
            eligible_amount,
            rate: Some(rate),
            zakat_due: Some(zakat_due),
            calculation_trace: trace,
        })
    }

    /// Builds a flat-fee result where the total is the amount to pay.
    pub fn flat(wealth_type: WealthType, total: Decimal, trace: Vec<CalculationStep>) -> Self {
        Self {
            wealth_type,
            total_assets: total,
            deductions: Decimal::ZERO,
            eligible_amount: total,
            rate: None,
            zakat_due: None,
            calculation_trace: trace,
        }
    }

    /// An all-zero result, used when a calculation cannot be completed.
    pub fn zero(wealth_type: WealthType) -> Self {
        let trace = vec![CalculationStep::info("No amount could be determined")];
        if wealth_type.is_rate_based() {
            Self {
                wealth_type,
                total_assets: Decimal::ZERO,
                deductions: Decimal::ZERO,
                eligible_amount: Decimal::ZERO,
                rate: None,
                zakat_due: Some(Decimal::ZERO),
                calculation_trace: trace,
            }
        } else {
            Self::flat(wealth_type, Decimal::ZERO, trace)
        }
    }

    /// The amount the user actually hands over: the payable amount for
    /// rate-based categories, the total for flat fees.
    pub fn amount_due(&self) -> Decimal {
        self.zakat_due.unwrap_or(self.eligible_amount)
    }

    /// Returns the amount due formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        let rounded = self
            .amount_due()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }

    /// Generates a human-readable, step-by-step explanation of the calculation.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(output, "Explanation for {}:", self.wealth_type);
        let _ = writeln!(output, "{:-<50}", "");

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &self.calculation_trace {
            match (step.operation, step.amount) {
                (Operation::Info, _) | (_, None) => {
                    let _ = writeln!(output, "  INFO: {}", step.description);
                }
                (Operation::Rate, Some(rate)) => {
                    let _ = writeln!(output, "  {:<width$} : {} {:>12.3}", step.description, step.operation.symbol(), rate);
                }
                (op, Some(amount)) => {
                    let _ = writeln!(output, "  {:<width$} : {} {:>12.2}", step.description, op.symbol(), amount);
                }
            }
        }

        let _ = writeln!(output, "{:-<50}", "");
        let _ = writeln!(output, "Amount Due: {}", self.format_amount());
        output
    }
}

impl std::fmt::Display for ZakatDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Category: {}", self.wealth_type)?;
        writeln!(f, "Eligible: {:.2}", self.eligible_amount)?;
        write!(f, "Due: {}", self.format_amount())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum ZakatError {
    #[error("Arithmetic overflow [{wealth_type}]: operation '{operation}' failed")]
    Overflow {
        operation: String,
        wealth_type: WealthType,
    },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ZakatError {
    pub fn overflow(operation: impl Into<String>, wealth_type: WealthType) -> Self {
        ZakatError::Overflow {
            operation: operation.into(),
            wealth_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rated_zero_base_pays_nothing() {
        let details =
            ZakatDetails::rated(WealthType::Savings, dec!(0), dec!(0), dec!(0), dec!(0.025), vec![]).unwrap();
        assert_eq!(details.zakat_due, Some(Decimal::ZERO));
        assert_eq!(details.amount_due(), Decimal::ZERO);
    }

    #[test]
    fn test_flat_amount_due_is_total() {
        let details = ZakatDetails::flat(WealthType::Fitrah, dec!(35), vec![]);
        assert_eq!(details.zakat_due, None);
        assert_eq!(details.amount_due(), dec!(35));
        assert_eq!(details.format_amount(), "35.00");
    }

    #[test]
    fn test_explain_lists_steps() {
        let trace = vec![
            CalculationStep::initial("Current Assets", dec!(120000)),
            CalculationStep::subtract("Current Liabilities", dec!(50000)),
        ];
        let details =
            ZakatDetails::rated(WealthType::Business, dec!(120000), dec!(50000), dec!(70000), dec!(0.025), trace)
                .unwrap();
        let text = details.explain();
        assert!(text.contains("Current Liabilities"));
        assert!(text.contains("0.025"));
        assert!(text.contains("Amount Due: 1750.00"));
    }

    #[test]
    fn test_trace_serializes_camel_case_operation() {
        let step = CalculationStep::rate("Applied Rate", dec!(0.025));
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains(r#""operation":"rate""#));
    }

    #[test]
    fn test_overflow_error_message() {
        let err = ZakatError::overflow("summing balances", WealthType::Investment);
        assert_eq!(
            err.to_string(),
            "Arithmetic overflow [Investment]: operation 'summing balances' failed"
        );
    }
}
