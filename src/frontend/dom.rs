//! Small web-sys helpers shared by the controllers.
//!
//! Listeners (`gloo_events`) and task handles undo themselves on drop, so a
//! controller's lifetime bounds everything it registered.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::error::{InteractionError, Result};
use crate::timing::{Debounce, Throttle};

pub fn browser_window() -> Result<Window> {
    window().ok_or_else(|| InteractionError::missing("window"))
}

pub fn document() -> Result<Document> {
    browser_window()?
        .document()
        .ok_or_else(|| InteractionError::missing("document"))
}

pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| InteractionError::missing("body"))
}

pub fn by_id<T: JsCast>(id: &str) -> Result<T> {
    document()?
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| InteractionError::missing(format!("#{id}")))
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|win| win.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

pub fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

/// Wall-clock epoch milliseconds, for log timestamps.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since navigation start. Never steps backwards, so rate
/// limiting reads this rather than the wall clock.
pub fn monotonic_ms() -> f64 {
    window()
        .and_then(|win| win.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(now_ms)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

pub fn clear_style(element: &Element, property: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().remove_property(property);
    }
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn throttled(
    interval_ms: u32,
    mut callback: impl FnMut(&Event) + 'static,
) -> impl FnMut(&Event) + 'static {
    let mut throttle = Throttle::new(interval_ms);
    move |event| {
        if throttle.try_fire(monotonic_ms()) {
            callback(event);
        }
    }
}

/// Runs the callback once the calls have been quiet for the delay. A newer
/// call replaces the pending timeout, which cancels it.
#[derive(Clone)]
pub struct Debounced {
    delay_ms: u32,
    state: Rc<RefCell<Debounce>>,
    pending: Rc<RefCell<Option<Timeout>>>,
    callback: Rc<dyn Fn()>,
}

impl Debounced {
    pub fn new(delay_ms: u32, callback: impl Fn() + 'static) -> Self {
        Self {
            delay_ms,
            state: Rc::new(RefCell::new(Debounce::new(delay_ms))),
            pending: Rc::new(RefCell::new(None)),
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self) {
        let ticket = self.state.borrow_mut().call(monotonic_ms());
        let state = Rc::clone(&self.state);
        let callback = Rc::clone(&self.callback);

        let timeout = Timeout::new(self.delay_ms, move || {
            let fire = state.borrow_mut().fire(ticket);
            if fire {
                callback();
            }
        });
        *self.pending.borrow_mut() = Some(timeout);
    }
}

/// Owner side of a cancellable background task. Dropping it cancels.
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

#[derive(Clone)]
pub struct TaskToken {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self {
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn token(&self) -> TaskToken {
        TaskToken {
            cancelled: Rc::clone(&self.cancelled),
        }
    }
}

impl TaskToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}
