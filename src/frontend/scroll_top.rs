use std::rc::Rc;

use gloo_events::EventListener;
use yew::prelude::*;

use super::dom::{body, document, scroll_y, smooth_scroll_to, throttled};
use crate::config::InteractionConfig;
use crate::error::Result;
use crate::scroll::ScrollChrome;

const HOST_ID: &str = "scroll-to-top-root";

#[derive(Properties, PartialEq)]
pub struct ScrollTopProps {
    pub config: Rc<InteractionConfig>,
}

fn button_style(visible: bool, hovered: bool) -> String {
    let (opacity, visibility) = if visible {
        ("1", "visible")
    } else {
        ("0", "hidden")
    };
    let (transform, shadow) = if hovered {
        ("translateY(-3px)", "0 10px 25px rgba(0, 0, 0, 0.3)")
    } else {
        ("translateY(0)", "0 4px 15px rgba(0, 0, 0, 0.2)")
    };

    format!(
        "position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; \
         border: none; border-radius: 50%; cursor: pointer; z-index: 1000; \
         transition: all 0.3s ease; opacity: {opacity}; visibility: {visibility}; \
         transform: {transform}; box-shadow: {shadow};"
    )
}

#[function_component(ScrollTopButton)]
pub fn scroll_top_button(props: &ScrollTopProps) -> Html {
    let visible = use_state(|| false);
    let hovered = use_state(|| false);

    {
        let visible = visible.clone();
        let config = Rc::clone(&props.config);
        let throttle_ms = config.scroll_throttle_ms;
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|win| {
                let update = move || {
                    visible.set(ScrollChrome::from_offset(scroll_y(), &config).show_scroll_top);
                };
                update();
                EventListener::new(&win, "scroll", throttled(throttle_ms, move |_| update()))
            });
            move || drop(listener)
        });
    }

    let onclick = Callback::from(|_: MouseEvent| smooth_scroll_to(0.0));
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    html! {
        <button
            class={classes!("scroll-to-top", (*visible).then_some("visible"))}
            type="button"
            aria-label="Scroll to top"
            style={button_style(*visible, *hovered)}
            onclick={onclick}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <span aria-hidden="true">{"↑"}</span>
        </button>
    }
}

/// Appends a host element to `<body>` and renders the button into it.
pub fn mount(config: Rc<InteractionConfig>) -> Result<yew::AppHandle<ScrollTopButton>> {
    let host = document()?.create_element("div")?;
    host.set_id(HOST_ID);
    body()?.append_child(&host)?;

    let props = ScrollTopProps { config };
    Ok(yew::Renderer::<ScrollTopButton>::with_root_and_props(host, props).render())
}
