use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::dom::{body, browser_window, document, TaskHandle};
use crate::error::Result;
use crate::loading::{LoadingPhase, LoadingTimeline, LOADING_LABEL};

#[derive(Properties, PartialEq)]
pub struct LoadingScreenProps {
    pub timeline: LoadingTimeline,
    pub host: Element,
}

fn overlay_style(phase: LoadingPhase, fade_ms: u32) -> String {
    let opacity = if phase == LoadingPhase::Visible { "1" } else { "0" };
    format!(
        "position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; \
         z-index: 9999; opacity: {opacity}; transition: opacity {fade_ms}ms ease;"
    )
}

#[function_component(LoadingScreen)]
pub fn loading_screen(props: &LoadingScreenProps) -> Html {
    let phase = use_state(|| LoadingPhase::Visible);

    {
        let phase = phase.clone();
        let timeline = props.timeline;
        use_effect_with((), move |_| {
            let task = TaskHandle::new();
            let token = task.token();
            let start = move || {
                let token = token.clone();
                let phase = phase.clone();
                spawn_local(async move {
                    TimeoutFuture::new(timeline.hold_ms).await;
                    if token.is_cancelled() {
                        return;
                    }
                    phase.set(timeline.phase_at(timeline.hold_ms));

                    TimeoutFuture::new(timeline.fade_ms).await;
                    if token.is_cancelled() {
                        return;
                    }
                    phase.set(timeline.phase_at(timeline.total_ms()));
                });
            };

            let already_loaded = document().is_ok_and(|doc| doc.ready_state() == "complete");
            let listener = if already_loaded {
                start();
                None
            } else {
                browser_window()
                    .map(|win| EventListener::once(&win, "load", move |_| start()))
                    .map_err(|err| log::warn!("loading screen has no load hook: {err}"))
                    .ok()
            };

            move || {
                drop(listener);
                drop(task);
            }
        });
    }

    {
        let host = props.host.clone();
        use_effect_with(*phase, move |phase| {
            if *phase == LoadingPhase::Removed {
                host.remove();
                log::debug!("loading screen removed");
            }
            || ()
        });
    }

    if *phase == LoadingPhase::Removed {
        return html! {};
    }

    html! {
        <div class="loading-screen" style={overlay_style(*phase, props.timeline.fade_ms)}>
            <div class="loader">
                <div class="spinner" aria-hidden="true"></div>
                <p class="loading-label">{LOADING_LABEL}</p>
            </div>
        </div>
    }
}

pub fn mount(timeline: LoadingTimeline) -> Result<yew::AppHandle<LoadingScreen>> {
    let host = document()?.create_element("div")?;
    host.set_id("loading-root");
    let body = body()?;
    body.insert_before(&host, body.first_child().as_ref())?;

    Ok(
        yew::Renderer::<LoadingScreen>::with_root_and_props(
            host.clone(),
            LoadingScreenProps { timeline, host },
        )
        .render(),
    )
}
