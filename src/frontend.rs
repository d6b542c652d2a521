//! Browser entry point. Builds every controller once the DOM is ready and
//! keeps them alive for the life of the page.

mod animations;
mod contact;
mod dom;
mod hooks;
mod lazy_images;
mod loading;
mod navigation;
mod observer;
mod scroll_top;
mod theme;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;

use crate::config::{InteractionConfig, CONFIG_ELEMENT_ID};
use crate::error::Result;
use crate::loading::LoadingTimeline;

pub use hooks::track_event;
pub use theme::ThemeController;

use animations::AnimationController;
use contact::ContactController;
use dom::{browser_window, document};
use hooks::PageHooks;
use lazy_images::LazyImageLoader;
use navigation::NavigationController;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static READY_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Controllers share nothing but the document. Each one is optional: a page
/// without the markup a controller needs simply goes without it.
struct Page {
    _hooks: Option<PageHooks>,
    _theme: Option<ThemeController>,
    _navigation: Option<NavigationController>,
    _animations: Option<AnimationController>,
    _contact: Option<ContactController>,
    _lazy_images: Option<LazyImageLoader>,
    _scroll_top: Option<yew::AppHandle<scroll_top::ScrollTopButton>>,
    _loading: Option<yew::AppHandle<loading::LoadingScreen>>,
}

impl Page {
    fn start(config: InteractionConfig) -> Self {
        let config = Rc::new(config);

        Self {
            _hooks: started("page hooks", PageHooks::new()),
            _theme: started("theme", ThemeController::new()),
            _navigation: started("navigation", NavigationController::new(&config)),
            _animations: started("animations", AnimationController::new(&config)),
            _contact: started("contact form", ContactController::new(&config)),
            _lazy_images: started("lazy images", LazyImageLoader::new()),
            _scroll_top: started("scroll-to-top", scroll_top::mount(Rc::clone(&config))),
            _loading: config
                .loading_screen
                .then(|| {
                    started(
                        "loading screen",
                        loading::mount(LoadingTimeline::new(
                            config.loading_hold_ms,
                            config.loading_fade_ms,
                        )),
                    )
                })
                .flatten(),
        }
    }
}

fn started<T>(name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(controller) => {
            log::info!("{name} ready");
            Some(controller)
        }
        Err(err) => {
            log::warn!("{name} skipped: {err}");
            None
        }
    }
}

fn load_config() -> (InteractionConfig, Option<String>) {
    let raw = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match raw {
        None => (InteractionConfig::default(), None),
        Some(raw) => match InteractionConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(err) => (InteractionConfig::default(), Some(err.to_string())),
        },
    }
}

fn start_page(config: InteractionConfig) {
    let page = Page::start(config);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

/// Drops every controller, which removes their listeners and cancels any
/// timers still running.
pub fn teardown() {
    PAGE.with(|slot| slot.borrow_mut().take());
    READY_LISTENER.with(|slot| slot.borrow_mut().take());
}

pub fn run() {
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config();
    if let Err(err) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
    if let Some(err) = config_error {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
    }

    let still_parsing = document().is_ok_and(|doc| doc.ready_state() == "loading");
    if !still_parsing {
        start_page(config);
        return;
    }

    let listener = browser_window().map(|win| {
        EventListener::once(&win, "DOMContentLoaded", move |_| start_page(config))
    });
    match listener {
        Ok(listener) => READY_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener)),
        Err(err) => log::error!("cannot wait for DOMContentLoaded: {err}"),
    }
}
