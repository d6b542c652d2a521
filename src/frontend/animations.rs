use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use super::dom::{clear_style, query, query_all, query_all_within, set_style, TaskHandle};
use super::observer::VisibilityObserver;
use crate::animation::{
    parse_counter_target, title_line_delays, Counter, HoverEffect, REVEALED_CLASS,
    REVEAL_SELECTOR,
};
use crate::config::InteractionConfig;
use crate::error::Result;
use crate::reveal::ObserverOptions;

pub struct AnimationController {
    _reveal: VisibilityObserver,
    _counters: VisibilityObserver,
    _hover: Vec<EventListener>,
    _title_timers: Vec<Timeout>,
    // One per started counter; dropping the controller stops them mid-count.
    _counter_tasks: Rc<RefCell<Vec<TaskHandle>>>,
}

impl AnimationController {
    pub fn new(config: &InteractionConfig) -> Result<Self> {
        let reveal = VisibilityObserver::new(&ObserverOptions::reveal(config))?;
        for element in query_all(REVEAL_SELECTOR) {
            reveal.observe(&element, |element| {
                let _ = element.class_list().add_1(REVEALED_CLASS);
            });
        }
        log::debug!("watching {} elements for entrance", reveal.pending());

        let hover = bind_hover_effects();
        let title_timers = stage_title(config);

        let counter_tasks = Rc::new(RefCell::new(Vec::new()));
        let counters = VisibilityObserver::new(&ObserverOptions::counter(config))?;
        for element in query_all(".stat-number") {
            let text = element.text_content().unwrap_or_default();
            let Some(target) = parse_counter_target(&text) else {
                log::debug!("stat {text:?} is not numeric, leaving as is");
                continue;
            };

            let tasks = Rc::clone(&counter_tasks);
            let tick_ms = config.counter_tick_ms;
            let steps = config.counter_steps;
            counters.observe(&element, move |element| {
                let task = TaskHandle::new();
                spawn_counter(element, Counter::new(target, steps), tick_ms, &task);
                tasks.borrow_mut().push(task);
            });
        }

        Ok(Self {
            _reveal: reveal,
            _counters: counters,
            _hover: hover,
            _title_timers: title_timers,
            _counter_tasks: counter_tasks,
        })
    }
}

fn bind_hover_effects() -> Vec<EventListener> {
    let mut listeners = Vec::new();

    for effect in HoverEffect::ALL {
        for element in query_all(effect.selector()) {
            let target = element.clone();
            listeners.push(EventListener::new(&element, "mouseenter", move |_| {
                set_style(&target, "transform", effect.transform());
            }));

            let target = element.clone();
            listeners.push(EventListener::new(&element, "mouseleave", move |_| {
                clear_style(&target, "transform");
            }));
        }
    }

    listeners
}

/// Hides each `.title-line` and schedules its slide-in.
fn stage_title(config: &InteractionConfig) -> Vec<Timeout> {
    let Some(title) = query(".hero-title") else {
        return Vec::new();
    };

    let lines = query_all_within(&title, ".title-line");
    let delays = title_line_delays(lines.len(), config.title_lead_in_ms, config.title_stagger_ms);

    lines
        .into_iter()
        .zip(delays)
        .map(|(line, delay)| {
            set_style(&line, "opacity", "0");
            set_style(&line, "transform", "translateY(50px)");
            set_style(&line, "transition", "opacity 0.8s ease, transform 0.8s ease");

            Timeout::new(delay, move || {
                set_style(&line, "opacity", "1");
                set_style(&line, "transform", "translateY(0)");
            })
        })
        .collect()
}

fn spawn_counter(element: Element, mut counter: Counter, tick_ms: u32, task: &TaskHandle) {
    let token = task.token();
    spawn_local(async move {
        loop {
            TimeoutFuture::new(tick_ms).await;
            if token.is_cancelled() {
                return;
            }

            let frame = counter.tick();
            element.set_text_content(Some(frame.text()));
            if frame.is_done() {
                return;
            }
        }
    });
}
