//! Arithmetic core of the Zakat calculator widget.
//!
//! Every calculator takes already-normalized, non-negative decimals and
//! applies one fixed rule. The nisab threshold is computed separately and
//! is never used to gate a payable amount.

pub mod config;
pub mod fitrah;
pub mod inputs;
pub mod maal;
pub mod nisab;
pub mod prelude;
pub mod traits;
pub mod types;

pub use config::ZakatConfig;
pub use traits::CalculateZakat;
pub use types::{WealthType, ZakatDetails, ZakatError};
