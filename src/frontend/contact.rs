//! Contact form: blur validation, submit, mailto hand-off.
//!
//! There is no transport. Submitting opens the visitor's mail client with a
//! prefilled message, waits out a short "sending" state, then resets the
//! form and shows a confirmation that removes itself.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::dom::{browser_window, by_id, document, query_all_within, TaskHandle};
use super::hooks::track_event;
use crate::config::InteractionConfig;
use crate::contact::{
    validate_all, ContactMessage, FieldError, FieldKind, FormField, SubmitControl, SUCCESS_MESSAGE,
};
use crate::error::{InteractionError, Result};

const FORM_ID: &str = "contactForm";
const FIELD_SELECTOR: &str = "input, textarea";
const ERROR_CLASS: &str = "error";
const ERROR_MESSAGE_CLASS: &str = "error-message";
const SUCCESS_CLASS: &str = "success-message";

pub struct ContactController {
    _listeners: Vec<EventListener>,
    _send: TaskHandle,
}

impl ContactController {
    pub fn new(config: &InteractionConfig) -> Result<Self> {
        let form: HtmlFormElement = by_id(FORM_ID)?;
        let inputs = query_all_within(&form, FIELD_SELECTOR);
        let send = TaskHandle::new();
        let mut listeners = Vec::new();

        for input in &inputs {
            let target = input.clone();
            listeners.push(EventListener::new(input, "blur", move |_| {
                let mut field = read_field(&target);
                match field.on_blur() {
                    Some(error) => show_field_error(&target, error),
                    None => clear_field_error(&target),
                }
            }));

            let target = input.clone();
            listeners.push(EventListener::new(input, "input", move |_| {
                clear_field_error(&target);
            }));
        }

        let inputs = Rc::new(inputs);
        let recipient = config.contact_recipient.clone();
        let send_delay_ms = config.send_delay_ms;
        let banner_ms = config.success_banner_ms;
        let token = send.token();
        let form_handle = form.clone();
        let control = Rc::new(RefCell::new(SubmitControl::default()));
        let options = EventListenerOptions::enable_prevent_default();
        listeners.push(EventListener::new_with_options(&form, "submit", options, move |event| {
            event.prevent_default();

            let mut fields: Vec<FormField> = inputs.iter().map(read_field).collect();
            let all_valid = validate_all(&mut fields);
            for (input, field) in inputs.iter().zip(&fields) {
                match field.error() {
                    Some(error) => show_field_error(input, error),
                    None => clear_field_error(input),
                }
            }
            if !all_valid {
                log::debug!("contact form blocked by field validation");
                return;
            }

            let button = submit_button(&form_handle);
            if let Some(button) = &button {
                begin_sending(button, &control);
            }

            let message = ContactMessage::from_fields(&fields);
            if let Err(err) = open_mail_client(&message, &recipient) {
                log::error!("contact hand-off failed: {err}");
                if let Some(button) = &button {
                    restore_submit(button, &control);
                }
                return;
            }
            track_event(
                "contact_submitted",
                serde_json::json!({ "subject_len": message.subject.chars().count() }),
            );

            let form = form_handle.clone();
            let token = token.clone();
            let control = Rc::clone(&control);
            spawn_local(async move {
                TimeoutFuture::new(send_delay_ms).await;
                if token.is_cancelled() {
                    return;
                }

                if let Some(button) = &button {
                    restore_submit(button, &control);
                }
                form.reset();
                for input in query_all_within(&form, FIELD_SELECTOR) {
                    clear_field_error(&input);
                }

                let Some(banner) = show_success(&form) else {
                    return;
                };
                TimeoutFuture::new(banner_ms).await;
                banner.remove();
            });
        }));

        Ok(Self {
            _listeners: listeners,
            _send: send,
        })
    }
}

fn read_field(element: &Element) -> FormField {
    let name = element
        .get_attribute("name")
        .or_else(|| element.get_attribute("id"))
        .unwrap_or_default();

    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        FormField::new(name, FieldKind::from_input_type(&input.type_()), input.value())
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        FormField::new(name, FieldKind::Text, textarea.value())
    } else {
        FormField::new(name, FieldKind::Text, element.text_content().unwrap_or_default())
    }
}

fn show_field_error(field: &Element, error: FieldError) {
    clear_field_error(field);
    let _ = field.class_list().add_1(ERROR_CLASS);

    let Ok(document) = document() else {
        return;
    };
    let Ok(message) = document.create_element("div") else {
        return;
    };
    message.set_class_name(ERROR_MESSAGE_CLASS);
    message.set_text_content(Some(&error.to_string()));
    let _ = field.insert_adjacent_element("afterend", &message);
}

fn clear_field_error(field: &Element) {
    let _ = field.class_list().remove_1(ERROR_CLASS);

    let Some(parent) = field.parent_element() else {
        return;
    };
    if let Ok(Some(message)) = parent.query_selector(&format!(".{ERROR_MESSAGE_CLASS}")) {
        message.remove();
    }
}

fn submit_button(form: &HtmlFormElement) -> Option<HtmlButtonElement> {
    form.query_selector("button[type='submit'], button:not([type])")
        .ok()
        .flatten()?
        .dyn_into::<HtmlButtonElement>()
        .ok()
}

fn begin_sending(button: &HtmlButtonElement, control: &RefCell<SubmitControl>) {
    let label = control.borrow_mut().begin(button.inner_html());
    button.set_text_content(Some(label));
    button.set_disabled(true);
}

fn restore_submit(button: &HtmlButtonElement, control: &RefCell<SubmitControl>) {
    if let Some(markup) = control.borrow_mut().restore() {
        button.set_inner_html(&markup);
    }
    button.set_disabled(false);
}

fn open_mail_client(message: &ContactMessage, recipient: &str) -> Result<()> {
    let uri = message.mailto_uri(recipient)?;
    browser_window()?
        .location()
        .set_href(uri.as_str())
        .map_err(InteractionError::from)
}

fn show_success(form: &HtmlFormElement) -> Option<Element> {
    let banner = document().ok()?.create_element("div").ok()?;
    banner.set_class_name(SUCCESS_CLASS);
    banner.set_text_content(Some(SUCCESS_MESSAGE));
    form.insert_adjacent_element("beforebegin", &banner).ok()?;
    Some(banner)
}
