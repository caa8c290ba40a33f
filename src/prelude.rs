//! Prelude module for the Zakat widget
//!
//! Re-exports the widget, its ports and the calculator prelude.
//!
//! # Usage
//!
//! ```rust
//! use zakat_widget::prelude::*;
//! ```

pub use zakat_core::prelude::*;
pub use zakat_i18n::{CurrencyFormatter, Translator, ZakatLocale};

pub use crate::config::{ConfigError, WidgetConfig};
pub use crate::form::{Action, ButtonId, CategoryForm, CategoryResult, FieldId, OutputId, SharedField, Tab};
pub use crate::state::{
    KeyValueStore, MemoryLocation, MemoryStore, PageLocation, PersistedState, SessionState, StateStore, StoreError,
};
pub use crate::widget::{ClipboardWrite, CopyNotice, Effect, Host, HostError, WidgetEvent, ZakatWidget};
