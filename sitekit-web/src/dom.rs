use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Storage, Window};

use sitekit_core::{ClassDelta, ScrollLock};

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error outside of a browser context.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when the window has no document.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("`document` unavailable"))
}

/// Document `<body>`, if the page has one.
#[must_use]
pub fn body() -> Option<HtmlElement> {
    document().ok().and_then(|doc| doc.body())
}

#[must_use]
pub fn element_by_id(id: &str) -> Option<Element> {
    document().ok().and_then(|doc| doc.get_element_by_id(id))
}

/// Every element matching `selector`, cast to `T`. Non-matching casts are
/// skipped.
#[must_use]
pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    let doc = match document() {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("cannot query `{selector}`: {}", js_error_message(&err));
            return Vec::new();
        }
    };
    let Ok(list) = doc.query_selector_all(selector) else {
        log::warn!("invalid selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

pub fn apply_class_delta(element: &Element, delta: &ClassDelta) {
    let list = element.class_list();
    for class in &delta.remove {
        let _ = list.remove_1(class);
    }
    for class in &delta.add {
        let _ = list.add_1(class);
    }
}

pub fn set_scroll_lock(lock: ScrollLock) {
    if let Some(body) = body() {
        let _ = body.style().set_property("overflow", lock.overflow_css());
    }
}

/// Attach a listener for the lifetime of the page.
///
/// # Errors
/// Returns an error if the browser rejects the listener.
pub fn listen_forever<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listener removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// # Errors
    /// Returns an error if the browser rejects the listener.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let callback: &Function = self.closure.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, callback);
    }
}

/// A pending `setTimeout` callback. Dropping it clears the timer and frees
/// the closure, fired or not.
pub struct Timeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Run `callback` once after `delay_ms`.
    ///
    /// # Errors
    /// Returns an error if the timer cannot be scheduled.
    pub fn new<F>(delay_ms: u32, callback: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::once(callback);
        let handle = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Ok(win) = window() {
            win.clear_timeout_with_handle(self.handle);
        }
    }
}

/// Run `callback` every `period_ms` for the lifetime of the page.
///
/// # Errors
/// Returns an error if the interval cannot be scheduled.
pub fn set_interval_forever<F>(period_ms: u32, callback: F) -> Result<i32, JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::<dyn FnMut()>::new(callback);
    let handle = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        i32::try_from(period_ms).unwrap_or(i32::MAX),
    )?;
    closure.forget();
    Ok(handle)
}
