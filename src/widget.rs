//! The widget controller.
//!
//! Events flow one way: an event updates the session state or the mounted
//! form, the calculators run against the new values, and the returned
//! [`Effect`] tells the host how much of the markup to refresh.

use rust_decimal::Decimal;
use thiserror::Error;
use zakat_core::types::ZakatDetails;
use zakat_i18n::{CurrencyFormatter, Translator};

use crate::config::WidgetConfig;
use crate::form::{Action, ButtonId, CategoryForm, CategoryResult, FieldId, Tab};
use crate::state::{KeyValueStore, PageLocation, SessionState, StateStore};
use crate::view::{self, ViewContext};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Clipboard is unavailable")]
    ClipboardUnavailable,
    #[error("Printing is unavailable")]
    PrintUnavailable,
    #[error("Host call failed: {0}")]
    Call(String),
}

/// Outcome of [`Host::write_clipboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardWrite {
    /// The text is on the clipboard.
    Done,
    /// The write finishes later; the host shows one of the notices itself.
    Pending,
}

/// Dialog texts for a successful and a refused clipboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyNotice {
    pub copied: String,
    pub manual: String,
}

/// Page facilities the widget's buttons reach for.
pub trait Host {
    fn write_clipboard(&self, text: &str, notice: &CopyNotice) -> Result<ClipboardWrite, HostError>;
    /// Shows a blocking message.
    fn alert(&self, message: &str);
    fn print(&self) -> Result<(), HostError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    SelectTab(Tab),
    Input { field: FieldId, value: String },
    Action(Action),
}

/// What the host must redraw after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Only the results panel changed; see [`ZakatWidget::outputs`].
    Refresh,
    /// The mounted form changed; replace the whole markup.
    Render,
}

pub struct ZakatWidget<S, L> {
    config: WidgetConfig,
    store: StateStore<S, L>,
    form: CategoryForm,
    translator: Translator,
    formatter: CurrencyFormatter,
}

impl<S: KeyValueStore, L: PageLocation> ZakatWidget<S, L> {
    pub fn new(config: WidgetConfig, storage: S, location: L) -> Self {
        let config = config.sanitized();
        let store = StateStore::restore(&config, storage, location);
        let form = CategoryForm::for_tab(store.state().active_tab, store.state());
        tracing::debug!("Widget restored on tab {}", store.state().active_tab);

        Self {
            translator: Translator::new(config.locale),
            formatter: CurrencyFormatter::new(config.locale),
            config,
            store,
            form,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn store(&self) -> &StateStore<S, L> {
        &self.store
    }

    pub fn form(&self) -> &CategoryForm {
        &self.form
    }

    pub fn active_tab(&self) -> Tab {
        self.form.tab()
    }

    pub fn update<H: Host + ?Sized>(&mut self, event: WidgetEvent, host: &H) -> Effect {
        match event {
            WidgetEvent::SelectTab(tab) => self.select_tab(tab),
            WidgetEvent::Input { field, value } => self.input(field, value),
            WidgetEvent::Action(action) => self.perform(action, host),
        }
    }

    /// Entry point for `input`/`change` events. Unknown ids are ignored.
    pub fn on_input(&mut self, element_id: &str, value: &str) -> Effect {
        match FieldId::from_id(element_id) {
            Some(field) => self.input(field, value.to_string()),
            None => Effect::None,
        }
    }

    /// Entry point for `click` events: a tab button carries `data-tab`,
    /// action buttons are recognized by id.
    pub fn on_click<H: Host + ?Sized>(&mut self, element_id: &str, data_tab: Option<&str>, host: &H) -> Effect {
        if let Some(id) = data_tab {
            return match Tab::from_id(id) {
                Some(tab) => self.select_tab(tab),
                None => {
                    tracing::debug!("Ignoring click on unknown tab {:?}", id);
                    Effect::None
                }
            };
        }
        match ButtonId::from_id(element_id) {
            Some(button) => self.perform(button.action(), host),
            None => Effect::None,
        }
    }

    /// Results of the mounted form.
    pub fn result(&self) -> CategoryResult {
        self.form.result(self.store.state(), &self.config.zakat)
    }

    /// Calculation breakdown of the mounted form; `None` on the info tab.
    pub fn details(&self) -> Option<ZakatDetails> {
        self.form.calculate(self.store.state(), &self.config.zakat)
    }

    pub fn nisab_amount(&self) -> Decimal {
        self.store.state().nisab(&self.config.zakat).threshold()
    }

    /// Formatted results panel values as `(element id, text)`.
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        self.result()
            .entries()
            .into_iter()
            .map(|(id, amount)| (id.id(), self.formatter.format(amount)))
            .collect()
    }

    /// Full widget markup, stylesheet included.
    pub fn render(&self) -> String {
        let result = self.result();
        view::render_widget(&self.view_context(&result)).into_string()
    }

    /// Markup of the active tab only.
    pub fn render_view(&self) -> String {
        let result = self.result();
        view::render_view(&self.view_context(&result)).into_string()
    }

    /// The widget in a standalone HTML document.
    pub fn render_page(&self) -> String {
        let result = self.result();
        view::render_page(&self.view_context(&result)).into_string()
    }

    fn view_context<'a>(&'a self, result: &'a CategoryResult) -> ViewContext<'a> {
        ViewContext {
            config: &self.config,
            state: self.store.state(),
            form: &self.form,
            result,
            translator: &self.translator,
            formatter: &self.formatter,
        }
    }

    fn select_tab(&mut self, tab: Tab) -> Effect {
        tracing::debug!("Switching to tab {}", tab);
        self.store.set_active_tab(tab);
        self.form = CategoryForm::for_tab(tab, self.store.state());
        Effect::Render
    }

    fn input(&mut self, field: FieldId, value: String) -> Effect {
        if !self.form.shows(field) {
            tracing::debug!("Ignoring {} outside tab {}", field.id(), self.form.tab());
            return Effect::None;
        }
        if let Some(shared) = field.shared() {
            self.store.set_shared(shared, value.clone());
        }
        self.form.set(field, value);
        Effect::Refresh
    }

    fn perform<H: Host + ?Sized>(&mut self, action: Action, host: &H) -> Effect {
        match action {
            Action::CopyAmount => {
                let Some(amount) = self.result().amount_due() else {
                    return Effect::None;
                };
                let text = self.formatter.format(amount);
                self.copy_text(host, &text, "alert-copied");
                Effect::None
            }
            Action::MonthlyInstallment => {
                let payable = self
                    .details()
                    .and_then(|details| details.zakat_due)
                    .unwrap_or(Decimal::ZERO);
                let monthly = payable
                    .checked_div(self.config.zakat.months_per_year)
                    .unwrap_or(Decimal::ZERO);
                let amount = self.formatter.format(monthly);
                host.alert(&self.translator.translate_with("alert-monthly", &[("amount", amount.as_str())]));
                Effect::None
            }
            Action::ShowNisab => {
                let amount = self.formatter.format(self.nisab_amount());
                host.alert(&self.translator.translate_with("alert-nisab", &[("amount", amount.as_str())]));
                Effect::None
            }
            Action::SaveShared => {
                self.store.persist();
                host.alert(&self.translator.translate("alert-saved"));
                Effect::None
            }
            Action::ShareLink => {
                let href = self.store.location().href();
                self.copy_text(host, &href, "alert-link-copied");
                Effect::None
            }
            Action::Print => {
                if let Err(e) = host.print() {
                    tracing::debug!("Print failed: {}", e);
                    host.alert(&self.translator.translate("alert-print-unavailable"));
                }
                Effect::None
            }
            Action::Reset => {
                self.store.reset();
                self.form = CategoryForm::for_tab(self.store.state().active_tab, self.store.state());
                tracing::debug!("Widget reset");
                Effect::Render
            }
        }
    }

    /// Copies `text`; when the clipboard refuses, the dialog shows the value
    /// for manual copying instead.
    fn copy_text<H: Host + ?Sized>(&self, host: &H, text: &str, copied_key: &str) {
        let notice = CopyNotice {
            copied: self.translator.translate_with(copied_key, &[("value", text)]),
            manual: self.translator.translate_with("alert-copy-manual", &[("value", text)]),
        };
        match host.write_clipboard(text, &notice) {
            Ok(ClipboardWrite::Done) => host.alert(&notice.copied),
            Ok(ClipboardWrite::Pending) => tracing::debug!("Clipboard write pending"),
            Err(e) => {
                tracing::debug!("Clipboard write failed: {}", e);
                host.alert(&notice.manual);
            }
        }
    }
}

impl<S, L> std::fmt::Debug for ZakatWidget<S, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZakatWidget")
            .field("tab", &self.form.tab())
            .field("form", &self.form)
            .finish()
    }
}
