//! Browser implementation of [`UiPort`] and the wasm entry point.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, Window};

use bookcart_cache::LocalStorage;
use bookcart_observability::{LogEntry, LogLevel, LogSink};

use crate::config::WidgetConfig;
use crate::ui::{Callback, KeyCallback, UiPort};
use crate::widget::{storage_or_memory, Widget};

/// Id of the optional inline JSON config block.
const CONFIG_ELEMENT_ID: &str = "bookcart-config";

/// Writes log entries to the browser console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let msg = JsValue::from_str(rendered);
        match entry.level {
            LogLevel::Error => web_sys::console::error_1(&msg),
            LogLevel::Warn => web_sys::console::warn_1(&msg),
            LogLevel::Info => web_sys::console::info_1(&msg),
            LogLevel::Debug | LogLevel::Trace => web_sys::console::debug_1(&msg),
        }
    }
}

/// The live page.
#[derive(Debug, Clone)]
pub struct DomPort {
    window: Window,
    document: Document,
}

impl DomPort {
    /// Bind to the current window; `None` outside a browser page.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Text of the inline config block, if the page has one.
    pub fn inline_config(&self) -> Option<String> {
        self.document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
    }

    /// Current path, for log context.
    pub fn pathname(&self) -> Option<String> {
        self.window.location().pathname().ok()
    }

    /// `bootstrap.Modal.getOrCreateInstance(el)`, when Bootstrap is loaded.
    fn modal_instance(&self, el: &Element) -> Option<JsValue> {
        let bootstrap = Reflect::get(&self.window, &JsValue::from_str("bootstrap"))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())?;
        let modal = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))
            .ok()
            .filter(|v| v.is_function())?;
        let get_or_create: Function = Reflect::get(&modal, &JsValue::from_str("getOrCreateInstance"))
            .ok()?
            .dyn_into()
            .ok()?;
        get_or_create.call1(&modal, el).ok()
    }

    fn call_modal(&self, el: &Element, method: &str) -> bool {
        let Some(instance) = self.modal_instance(el) else {
            return false;
        };
        Reflect::get(&instance, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .map(|f| f.call0(&instance).is_ok())
            .unwrap_or(false)
    }
}

fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl UiPort for DomPort {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        collect(self.document.query_selector_all(selector))
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn query_all_in(&self, root: &Element, selector: &str) -> Vec<Element> {
        collect(root.query_selector_all(selector))
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn image_source(&self, el: &Element) -> Option<String> {
        // The `src` property is resolved against the document base, unlike
        // the raw attribute.
        let src = match el.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.src(),
            None => el.get_attribute("src")?,
        };
        Some(src).filter(|s| !s.is_empty())
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_inner_html(&self, el: &Element, html: &str) {
        el.set_inner_html(html);
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let style = el.style();
            let _ = if value.is_empty() {
                style.remove_property(property).map(|_| ())
            } else {
                style.set_property(property, value)
            };
        }
    }

    fn on(&self, el: &Element, event: &str, callback: Callback) {
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        // Listeners live as long as the page.
        closure.forget();
    }

    fn on_document_key(&self, callback: KeyCallback) {
        let closure =
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| callback(&ev.key()));
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn navigate(&self, path: &str) {
        let _ = self.window.location().set_href(path);
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback).forget();
    }

    fn show_modal(&self, el: &Element) -> bool {
        self.call_modal(el, "show")
    }

    fn hide_modal(&self, el: &Element) -> bool {
        self.call_modal(el, "hide")
    }
}

/// Module entry: build the widget and initialize it once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let port = DomPort::new().ok_or_else(|| JsValue::from_str("no document"))?;

    let boot_logger = WidgetConfig::default().logger(ConsoleSink);
    let config = match port.inline_config() {
        Some(text) => WidgetConfig::from_json_str(&text).unwrap_or_else(|e| {
            boot_logger
                .warn_builder("ignoring inline config")
                .field("error", format!("{:#}", e))
                .emit();
            WidgetConfig::default()
        }),
        None => WidgetConfig::default(),
    };

    let mut logger = config.logger(ConsoleSink);
    if let Some(path) = port.pathname() {
        logger = logger.with_page(path);
    }

    let storage = storage_or_memory(LocalStorage::open(), &logger);
    let document = port.document.clone();
    let widget = Widget::new(port, storage, config, logger);

    if document.ready_state() == "loading" {
        let init = Closure::once_into_js(move || widget.init());
        document.add_event_listener_with_callback("DOMContentLoaded", init.unchecked_ref())?;
    } else {
        widget.init();
    }

    Ok(())
}
