use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;
use crate::reveal::{ObserverOptions, OneShotRegistry};

type OnVisible = Box<dyn FnOnce(Element)>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// `IntersectionObserver` that calls each element's callback on its first
/// intersection and then stops watching it.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    registry: Rc<RefCell<OneShotRegistry<Element, OnVisible>>>,
    _callback: ObserverCallback,
}

impl VisibilityObserver {
    pub fn new(options: &ObserverOptions) -> Result<Self> {
        let registry: Rc<RefCell<OneShotRegistry<Element, OnVisible>>> =
            Rc::new(RefCell::new(OneShotRegistry::new()));

        let callback = {
            let registry = Rc::clone(&registry);
            ObserverCallback::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    observer.unobserve(&target);
                    let on_visible = registry.borrow_mut().take(&target);
                    if let Some(on_visible) = on_visible {
                        on_visible(target);
                    }
                }
            })
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            registry,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element, on_visible: impl FnOnce(Element) + 'static) {
        self.registry
            .borrow_mut()
            .register(element.clone(), Box::new(on_visible));
        self.observer.observe(element);
    }

    pub fn pending(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
