//! Embeddable Zakat calculator widget.
//!
//! Seven category calculators and an informational nisab threshold behind a
//! tabbed form. Session state is persisted to a key-value store and the page
//! URL; the markup is rendered with `maud`. Build with the `wasm` feature to
//! mount the widget in a browser page.

pub mod config;
pub mod form;
pub mod prelude;
pub mod state;
pub mod view;
pub mod widget;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::WidgetConfig;
pub use form::{Action, CategoryForm, FieldId, SharedField, Tab};
pub use state::{KeyValueStore, PageLocation, SessionState, StateStore};
pub use widget::{ClipboardWrite, CopyNotice, Effect, Host, HostError, WidgetEvent, ZakatWidget};
