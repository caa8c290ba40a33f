//! Session state and its synchronization with storage and the page URL.
//!
//! The browser pieces (local storage, `location`/`history`) sit behind the
//! [`KeyValueStore`] and [`PageLocation`] ports so the same store runs
//! natively with the in-memory implementations below.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use zakat_core::config::ZakatConfig;
use zakat_core::inputs::parse_amount;
use zakat_core::nisab::NisabReference;

use crate::config::WidgetConfig;
use crate::form::{SharedField, Tab};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Storage is unavailable")]
    Unavailable,
    #[error("Storage read failed: {0}")]
    Read(String),
    #[error("Storage write failed: {0}")]
    Write(String),
    #[error("Location update failed: {0}")]
    Location(String),
    #[error("Failed to encode state: {0}")]
    Encode(String),
}

/// Persistent key-value storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// The hosting page's address.
pub trait PageLocation {
    fn href(&self) -> String;
    fn query_param(&self, name: &str) -> Option<String>;
    /// Sets (or with `None` removes) a query parameter in place, without
    /// adding a navigation entry. The fragment is dropped.
    fn replace_query_param(&mut self, name: &str, value: Option<&str>) -> Result<(), StoreError>;
}

/// UI state that outlives a tab switch.
///
/// Shared fields keep the raw text the user typed; they are parsed only when
/// a calculator needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub active_tab: Tab,
    pub nisab_gold_price: String,
    pub nisab_grams: String,
    pub fitrah_per_head: String,
}

/// JSON snapshot written under the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub active_tab: String,
    pub nisab_gold_price: String,
    pub nisab_grams: String,
    pub fitrah_per_head: String,
}

fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

impl SessionState {
    pub fn defaults(config: &WidgetConfig) -> Self {
        Self {
            active_tab: Tab::default(),
            nisab_gold_price: config.default_gold_price.clone(),
            nisab_grams: config.zakat.nisab_gold_grams.normalize().to_string(),
            fitrah_per_head: config.default_fitrah_per_head.clone(),
        }
    }

    pub fn shared(&self, field: SharedField) -> &str {
        match field {
            SharedField::GoldPrice => &self.nisab_gold_price,
            SharedField::NisabGrams => &self.nisab_grams,
            SharedField::FitrahPerHead => &self.fitrah_per_head,
        }
    }

    fn shared_mut(&mut self, field: SharedField) -> &mut String {
        match field {
            SharedField::GoldPrice => &mut self.nisab_gold_price,
            SharedField::NisabGrams => &mut self.nisab_grams,
            SharedField::FitrahPerHead => &mut self.fitrah_per_head,
        }
    }

    pub fn gold_price(&self) -> Decimal {
        parse_amount(&self.nisab_gold_price)
    }

    /// Reference gold weight; an empty field falls back to the configured
    /// standard weight.
    pub fn nisab_grams(&self, config: &ZakatConfig) -> Decimal {
        if self.nisab_grams.trim().is_empty() {
            config.nisab_gold_grams
        } else {
            parse_amount(&self.nisab_grams)
        }
    }

    pub fn fitrah_rate(&self) -> Decimal {
        parse_amount(&self.fitrah_per_head)
    }

    pub fn nisab(&self, config: &ZakatConfig) -> NisabReference {
        NisabReference::new(self.gold_price(), self.nisab_grams(config))
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            active_tab: self.active_tab.id().to_string(),
            nisab_gold_price: self.nisab_gold_price.clone(),
            nisab_grams: self.nisab_grams.clone(),
            fitrah_per_head: self.fitrah_per_head.clone(),
        }
    }

    /// Overlays a stored JSON snapshot. Only a JSON object is read; keys that
    /// are missing, null or of an unexpected type are skipped, as is an
    /// unknown tab id. Any other JSON value leaves the state untouched.
    pub fn merge_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        let Value::Object(mut snapshot) = serde_json::from_str::<Value>(raw)? else {
            tracing::debug!("Ignoring stored state that is not an object");
            return Ok(());
        };

        if let Some(id) = value_text(snapshot.remove("activeTab")) {
            match Tab::from_id(&id) {
                Some(tab) => self.active_tab = tab,
                None => tracing::debug!("Ignoring unknown stored tab {:?}", id),
            }
        }
        if let Some(price) = value_text(snapshot.remove("nisabGoldPrice")) {
            self.nisab_gold_price = price;
        }
        if let Some(grams) = value_text(snapshot.remove("nisabGrams")) {
            self.nisab_grams = grams;
        }
        if let Some(rate) = value_text(snapshot.remove("fitrahPerHead")) {
            self.fitrah_per_head = rate;
        }
        Ok(())
    }
}

/// Owns the session state and keeps storage and the URL in step with it.
///
/// Storage and location failures never reach the caller; the state simply
/// stays in memory for the rest of the session.
#[derive(Debug)]
pub struct StateStore<S, L> {
    state: SessionState,
    defaults: SessionState,
    storage: S,
    location: L,
    storage_key: String,
    query_param: String,
}

impl<S: KeyValueStore, L: PageLocation> StateStore<S, L> {
    /// Seeds state from defaults, then the stored snapshot, then the query
    /// parameter.
    pub fn restore(config: &WidgetConfig, storage: S, location: L) -> Self {
        let defaults = SessionState::defaults(config);
        let mut state = defaults.clone();

        match storage.get_item(&config.storage_key) {
            Ok(Some(raw)) => {
                if let Err(e) = state.merge_json(&raw) {
                    tracing::debug!("Ignoring malformed stored state: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("Stored state unavailable: {}", e),
        }

        if let Some(id) = location.query_param(&config.query_param) {
            match Tab::from_id(&id) {
                Some(tab) => state.active_tab = tab,
                None => tracing::debug!("Ignoring unknown tab {:?} in query", id),
            }
        }

        Self {
            state,
            defaults,
            storage,
            location,
            storage_key: config.storage_key.clone(),
            query_param: config.query_param.clone(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
        self.write_query(tab);
        self.persist();
    }

    pub fn set_shared(&mut self, field: SharedField, value: impl Into<String>) {
        *self.state.shared_mut(field) = value.into();
        self.persist();
    }

    /// Writes the snapshot. Returns whether it reached storage.
    pub fn persist(&mut self) -> bool {
        match self.try_persist() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("State kept in memory only: {}", e);
                false
            }
        }
    }

    pub fn try_persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.state.snapshot()).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.storage.set_item(&self.storage_key, &json)
    }

    /// Clears the stored snapshot and returns to defaults. The query
    /// parameter is rewritten to the default tab so a reload agrees.
    pub fn reset(&mut self) {
        if let Err(e) = self.storage.remove_item(&self.storage_key) {
            tracing::debug!("Could not clear stored state: {}", e);
        }
        self.state = self.defaults.clone();
        self.write_query(self.state.active_tab);
    }

    fn write_query(&mut self, tab: Tab) {
        if let Err(e) = self.location.replace_query_param(&self.query_param, Some(tab.id())) {
            tracing::debug!("Query string not updated: {}", e);
        }
    }
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes fail, as a full or disabled `localStorage` does.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Write("quota exceeded".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Write("storage is read-only".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}

/// In-memory [`PageLocation`] over an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    base: String,
    params: Vec<(String, String)>,
    fragment: String,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, format!("#{}", fragment)),
            None => (href, String::new()),
        };
        let (base, query) = rest.split_once('?').unwrap_or((rest, ""));
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(name), decode_component(value))
            })
            .collect();

        Self {
            base: base.to_string(),
            params,
            fragment,
            replacements: 0,
        }
    }

    /// How many times the address was replaced in place.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("http://localhost/")
    }
}

impl PageLocation for MemoryLocation {
    fn href(&self) -> String {
        let mut href = self.base.clone();
        if !self.params.is_empty() {
            let query: Vec<String> = self
                .params
                .iter()
                .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
                .collect();
            href.push('?');
            href.push_str(&query.join("&"));
        }
        href.push_str(&self.fragment);
        href
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) -> Result<(), StoreError> {
        match (value, self.params.iter().position(|(key, _)| key == name)) {
            (Some(value), Some(index)) => {
                self.params[index].1 = value.to_string();
                let mut seen = false;
                self.params.retain(|(key, _)| {
                    if key != name {
                        return true;
                    }
                    let first = !seen;
                    seen = true;
                    first
                });
            }
            (Some(value), None) => self.params.push((name.to_string(), value.to_string())),
            (None, _) => self.params.retain(|(key, _)| key != name),
        }
        self.fragment.clear();
        self.replacements += 1;
        Ok(())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.clone(),
    }
}
