//! Page-wide listeners that don't belong to any one widget: keyboard focus
//! styling, uncaught error logging, load timing, and the placeholder
//! analytics and service worker hooks.

use gloo_events::EventListener;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, KeyboardEvent};

use super::dom::{body, browser_window, document, now_ms};
use crate::error::Result;
use crate::telemetry::event_line;

const KEYBOARD_CLASS: &str = "keyboard-navigation";

pub fn track_event(event: &str, fields: serde_json::Value) {
    log::info!("{}", event_line(now_ms(), event, fields));
}

pub struct PageHooks {
    _listeners: Vec<EventListener>,
}

impl PageHooks {
    pub fn new() -> Result<Self> {
        let window = browser_window()?;
        let document = document()?;
        let body = body()?;
        let mut listeners = Vec::new();

        {
            let body = body.clone();
            listeners.push(EventListener::new(&document, "keydown", move |event| {
                let is_tab = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Tab");
                if is_tab {
                    let _ = body.class_list().add_1(KEYBOARD_CLASS);
                }
            }));
        }

        listeners.push(EventListener::new(&document, "mousedown", move |_| {
            let _ = body.class_list().remove_1(KEYBOARD_CLASS);
        }));

        listeners.push(EventListener::new(&window, "error", |event| {
            match event.dyn_ref::<ErrorEvent>() {
                Some(error) => log::error!(
                    "uncaught error: {} ({}:{}:{})",
                    error.message(),
                    error.filename(),
                    error.lineno(),
                    error.colno()
                ),
                None => log::error!("uncaught error event: {}", event.type_()),
            }
        }));

        listeners.push(EventListener::new(&window, "load", |_| {
            if let Some(performance) = browser_window().ok().and_then(|win| win.performance()) {
                log::debug!("page loaded in {:.0} ms", performance.now());
            }
            track_event("page_view", serde_json::json!({}));
        }));

        let has_service_worker =
            Reflect::has(&window.navigator(), &JsValue::from_str("serviceWorker")).unwrap_or(false);
        if has_service_worker {
            log::info!("service worker supported; offline mode is not enabled");
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
