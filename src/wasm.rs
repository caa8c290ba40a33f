//! Browser binding: mounts the widget into a page and wires DOM events.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement, ShadowRoot, ShadowRootInit, ShadowRootMode, Storage, Window};

use crate::config::WidgetConfig;
use crate::state::{KeyValueStore, PageLocation, StoreError};
use crate::widget::{ClipboardWrite, CopyNotice, Effect, Host, HostError, ZakatWidget};

/// Custom element the widget is mounted as.
pub const ELEMENT_TAG: &str = "ilmualam-zakat";

/// Initialize hooks for better debugging in WASM
#[wasm_bindgen]
pub fn init_hooks() {
    console_error_panic_hook::set_once();
}

/// Mounts one widget into the element with id `container_id`.
///
/// `primary` and `dark_primary` become the element's `primary` and
/// `dark-primary` attributes; missing or unsafe colours use the defaults.
#[wasm_bindgen]
pub fn mount(container_id: &str, primary: Option<String>, dark_primary: Option<String>) -> Result<(), JsError> {
    let config = WidgetConfig::from_attributes(primary.as_deref(), dark_primary.as_deref());
    mount_config(container_id, config)
}

/// Mounts with a full `WidgetConfig` object.
#[wasm_bindgen]
pub fn mount_with_options(container_id: &str, options: JsValue) -> Result<(), JsError> {
    let config: WidgetConfig = if options.is_undefined() || options.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
    };
    mount_config(container_id, config.sanitized())
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> JsError {
    JsError::new(&js_message(&value))
}

/// `window.localStorage`; absent when the browser blocks it.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::debug!("localStorage unavailable, state stays in memory");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.get_item(key).map_err(|e| StoreError::Read(js_message(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StoreError::Write(js_message(&e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.remove_item(key).map_err(|e| StoreError::Write(js_message(&e)))
    }
}

/// `window.location`, updated through `history.replaceState`.
pub struct BrowserLocation {
    window: Window,
}

impl BrowserLocation {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn url(&self) -> Result<web_sys::Url, StoreError> {
        web_sys::Url::new(&self.href()).map_err(|e| StoreError::Location(js_message(&e)))
    }
}

impl PageLocation for BrowserLocation {
    fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.url().ok()?.search_params().get(name)
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) -> Result<(), StoreError> {
        let url = self.url()?;
        url.set_hash("");
        let params = url.search_params();
        match value {
            Some(value) => params.set(name, value),
            None => params.delete(name),
        }
        let history = self
            .window
            .history()
            .map_err(|e| StoreError::Location(js_message(&e)))?;
        history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
            .map_err(|e| StoreError::Location(js_message(&e)))
    }
}

/// Clipboard, dialogs and printing of the hosting window.
pub struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Host for BrowserHost {
    fn write_clipboard(&self, text: &str, notice: &CopyNotice) -> Result<ClipboardWrite, HostError> {
        // navigator.clipboard is missing on insecure origins.
        let navigator = self.window.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|e| HostError::Call(js_message(&e)))?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(HostError::ClipboardUnavailable);
        }
        let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(|e| HostError::Call(js_message(&e)))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| HostError::ClipboardUnavailable)?;
        let returned = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|e| HostError::Call(js_message(&e)))?;
        let Ok(promise) = returned.dyn_into::<js_sys::Promise>() else {
            return Ok(ClipboardWrite::Done);
        };

        // writeText rejects without focus or permission.
        let window = self.window.clone();
        let notice = notice.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let message = match JsFuture::from(promise).await {
                Ok(_) => notice.copied,
                Err(e) => {
                    tracing::debug!("Clipboard write rejected: {}", js_message(&e));
                    notice.manual
                }
            };
            if let Err(e) = window.alert_with_message(&message) {
                tracing::debug!("alert() failed: {}", js_message(&e));
            }
        });
        Ok(ClipboardWrite::Pending)
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::debug!("alert() failed: {}", js_message(&e));
        }
    }

    fn print(&self) -> Result<(), HostError> {
        self.window.print().map_err(|e| HostError::Call(js_message(&e)))
    }
}

type BrowserWidget = ZakatWidget<BrowserStorage, BrowserLocation>;

struct Mounted {
    widget: BrowserWidget,
    root: ShadowRoot,
    host: BrowserHost,
}

impl Mounted {
    fn apply(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Render => self.root.set_inner_html(&self.widget.render()),
            Effect::Refresh => {
                for (id, text) in self.widget.outputs() {
                    if let Some(element) = self.root.get_element_by_id(id) {
                        element.set_text_content(Some(&text));
                    }
                }
            }
        }
    }
}

fn mount_config(container_id: &str, config: WidgetConfig) -> Result<(), JsError> {
    let window = web_sys::window().ok_or_else(|| JsError::new("No window available"))?;
    let document = window.document().ok_or_else(|| JsError::new("No document available"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsError::new(&format!("Container #{} not found", container_id)))?;

    let element = document.create_element(ELEMENT_TAG).map_err(js_error)?;
    element.set_attribute("primary", &config.primary).map_err(js_error)?;
    element.set_attribute("dark-primary", &config.dark_primary).map_err(js_error)?;
    container.append_child(&element).map_err(js_error)?;
    let root = element
        .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
        .map_err(js_error)?;

    let widget = ZakatWidget::new(config, BrowserStorage::new(&window), BrowserLocation::new(window.clone()));
    let mounted = Rc::new(RefCell::new(Mounted {
        widget,
        root: root.clone(),
        host: BrowserHost::new(window),
    }));
    mounted.borrow().apply(Effect::Render);

    bind_inputs(&root, &mounted, "input")?;
    bind_inputs(&root, &mounted, "change")?;
    bind_clicks(&root, &mounted)?;
    tracing::debug!("Mounted {} into #{}", ELEMENT_TAG, container_id);
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Listeners sit on the shadow root, so they survive every re-render.
fn bind_inputs(root: &ShadowRoot, mounted: &Rc<RefCell<Mounted>>, event_name: &str) -> Result<(), JsError> {
    let mounted = Rc::clone(mounted);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(element) = event_element(&event) else {
            return;
        };
        let value = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            return;
        };

        let mut mounted = mounted.borrow_mut();
        let effect = mounted.widget.on_input(&element.id(), &value);
        mounted.apply(effect);
    });
    root.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn bind_clicks(root: &ShadowRoot, mounted: &Rc<RefCell<Mounted>>) -> Result<(), JsError> {
    let mounted = Rc::clone(mounted);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event_element(&event) else {
            return;
        };
        let Some(element) = target.closest("[data-tab], [id]").ok().flatten() else {
            return;
        };
        let data_tab = element.get_attribute("data-tab");

        let mut guard = mounted.borrow_mut();
        let Mounted { widget, host, .. } = &mut *guard;
        let effect = widget.on_click(&element.id(), data_tab.as_deref(), &*host);
        guard.apply(effect);
    });
    root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}
