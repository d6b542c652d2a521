use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};

use super::dom::{
    body, browser_window, by_id, clear_style, document, query_all, scroll_y, set_style,
    smooth_scroll_to, throttled, toggle_class, viewport_width, Debounced,
};
use crate::config::InteractionConfig;
use crate::error::Result;
use crate::navigation::{link_target, scroll_target, NavState, SectionSpan};
use crate::scroll::ScrollChrome;

const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";

struct NavElements {
    navbar: Element,
    menu: Element,
    toggle: Element,
    links: Vec<Element>,
    body: HtmlElement,
}

impl NavElements {
    fn show_menu(&self, open: bool) {
        toggle_class(&self.menu, ACTIVE_CLASS, open);
        toggle_class(&self.toggle, ACTIVE_CLASS, open);
        if open {
            set_style(&self.body, "overflow", "hidden");
        } else {
            clear_style(&self.body, "overflow");
        }
    }

    fn highlight(&self, active: &str) {
        for link in &self.links {
            let href = link.get_attribute("href").unwrap_or_default();
            toggle_class(link, ACTIVE_CLASS, link_target(&href) == Some(active));
        }
    }
}

pub struct NavigationController {
    _listeners: Vec<EventListener>,
}

impl NavigationController {
    pub fn new(config: &InteractionConfig) -> Result<Self> {
        let elements = Rc::new(NavElements {
            navbar: by_id("navbar")?,
            menu: by_id("nav-menu")?,
            toggle: by_id("hamburger")?,
            links: query_all(".nav-link"),
            body: body()?,
        });
        let state = Rc::new(RefCell::new(NavState::new()));
        let window = browser_window()?;
        let document = document()?;
        let mut listeners = Vec::new();

        {
            let toggle = elements.toggle.clone();
            let elements = Rc::clone(&elements);
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                let open = state.borrow_mut().toggle_menu();
                elements.show_menu(open);
            }));
        }

        for link in &elements.links {
            let elements = Rc::clone(&elements);
            let state = Rc::clone(&state);
            let header_offset = config.header_offset;
            let link_handle = link.clone();
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(link, "click", options, move |event| {
                event.prevent_default();

                let href = link_handle.get_attribute("href").unwrap_or_default();
                if let Some(section) = link_target(&href).and_then(section_by_id) {
                    let top = f64::from(section.offset_top());
                    smooth_scroll_to(scroll_target(top, header_offset));
                }

                if state.borrow_mut().close_menu() {
                    elements.show_menu(false);
                }
            }));
        }

        {
            let elements = Rc::clone(&elements);
            let state = Rc::clone(&state);
            listeners.push(EventListener::new(&document, "click", move |event| {
                if !state.borrow().is_menu_open() {
                    return;
                }

                let inside = event
                    .target()
                    .and_then(|target| target.dyn_into::<Node>().ok())
                    .is_some_and(|node| elements.navbar.contains(Some(&node)));
                if !inside && state.borrow_mut().close_menu() {
                    elements.show_menu(false);
                }
            }));
        }

        {
            let elements = Rc::clone(&elements);
            let state = Rc::clone(&state);
            let breakpoint = config.mobile_breakpoint;
            let on_resize = Debounced::new(config.resize_debounce_ms, move || {
                if state.borrow_mut().on_resize(viewport_width(), breakpoint) {
                    log::debug!("viewport widened past {breakpoint}px, closing menu");
                    elements.show_menu(false);
                }
            });
            listeners.push(EventListener::new(&window, "resize", move |_| on_resize.call()));
        }

        let on_scroll = {
            let elements = Rc::clone(&elements);
            let state = Rc::clone(&state);
            let config = config.clone();
            move || {
                let offset = scroll_y();
                let chrome = ScrollChrome::from_offset(offset, &config);
                toggle_class(&elements.navbar, SCROLLED_CLASS, chrome.navbar_scrolled);

                let sections = collect_sections();
                let mut state = state.borrow_mut();
                if state.update_active(&sections, offset, config.section_probe_offset) {
                    if let Some(active) = state.active() {
                        elements.highlight(active);
                    }
                }
            }
        };
        on_scroll();
        listeners.push(EventListener::new(
            &window,
            "scroll",
            throttled(config.scroll_throttle_ms, move |_| on_scroll()),
        ));

        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn section_by_id(id: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Section geometry is read on every pass since layout shifts as images load.
fn collect_sections() -> Vec<SectionSpan> {
    query_all("section[id]")
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .map(|section| {
            SectionSpan::new(
                section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect()
}
