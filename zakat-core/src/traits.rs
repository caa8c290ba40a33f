use crate::config::ZakatConfig;
use crate::types::{WealthType, ZakatDetails, ZakatError};

/// Trait to be implemented by all Zakat calculators.
pub trait CalculateZakat {
    /// Calculate Zakat details.
    ///
    /// Inputs are already normalized, so the only failure is arithmetic
    /// overflow at the edge of the decimal range.
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError>;

    /// The category this calculator belongs to.
    fn wealth_type(&self) -> WealthType;

    /// Like [`CalculateZakat::calculate_zakat`], degrading any failure to an
    /// all-zero result.
    fn calculate_or_zero(&self, config: &ZakatConfig) -> ZakatDetails {
        self.calculate_zakat(config).unwrap_or_else(|e| {
            tracing::debug!("Calculation degraded to zero: {}", e);
            ZakatDetails::zero(self.wealth_type())
        })
    }
}
