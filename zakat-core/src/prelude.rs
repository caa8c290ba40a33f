//! Prelude module for zakat-core
//!
//! Re-exports the calculators, traits and types most callers need.
//!
//! ```rust
//! use zakat_core::prelude::*;
//! ```

pub use crate::config::ZakatConfig;
pub use crate::inputs::{IntoZakatDecimal, parse_amount};
pub use crate::nisab::{NisabReference, nisab_threshold};
pub use crate::traits::CalculateZakat;
pub use crate::types::{CalculationStep, Operation, WealthType, ZakatDetails, ZakatError};

pub use crate::fitrah::{FitrahCalculator, calculate_fitrah};
pub use crate::maal::business::BusinessAssets;
pub use crate::maal::income::{IncomeBasis, IncomePeriod, IncomeZakatCalculator};
pub use crate::maal::investments::InvestmentAssets;
pub use crate::maal::precious_metals::PreciousMetals;
pub use crate::maal::retirement::RetirementWithdrawal;
pub use crate::maal::savings::SavingsAssets;
