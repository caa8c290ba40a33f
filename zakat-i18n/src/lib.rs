//! Currency formatting and user-facing text for the Zakat widget.
//!
//! One locale is supported (`ms-MY`, amounts in `RM`).

pub mod formatter;
pub mod translator;

pub use formatter::{CurrencyFormatter, ZakatLocale};
pub use translator::{Translator, default_translator};
