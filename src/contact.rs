//! Contact form validation and the mailto hand-off.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex_lite::Regex;
use thiserror::Error;
use url::Url;

use crate::error::{InteractionError, Result};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const SENDING_LABEL: &str = "Sending...";

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

/// Messages shown next to an invalid field.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

impl FieldKind {
    pub fn from_input_type(value: &str) -> Self {
        if value.eq_ignore_ascii_case("email") {
            Self::Email
        } else {
            Self::Text
        }
    }
}

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn validate_field(kind: FieldKind, value: &str) -> std::result::Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    if kind == FieldKind::Email && !is_email_shaped(value) {
        return Err(FieldError::InvalidEmail);
    }

    Ok(())
}

/// One input of the form. Validated on blur; typing clears a shown error.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    error: Option<FieldError>,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            error: None,
        }
    }

    pub fn on_blur(&mut self) -> Option<FieldError> {
        self.error = validate_field(self.kind, &self.value).err();
        self.error
    }

    pub fn on_input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = None;
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.error = None;
    }
}

/// Validates every field, even after the first failure, so all errors show.
pub fn validate_all(fields: &mut [FormField]) -> bool {
    fields
        .iter_mut()
        .fold(true, |all_valid, field| field.on_blur().is_none() && all_valid)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn from_fields(fields: &[FormField]) -> Self {
        let value_of = |name: &str| {
            fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| field.value.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            name: value_of("name"),
            email: value_of("email"),
            subject: value_of("subject"),
            message: value_of("message"),
        }
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    pub fn mailto_uri(&self, recipient: &str) -> Result<Url> {
        let raw = format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&self.subject),
            encode_component(&self.body())
        );
        Url::parse(&raw).map_err(|err| InteractionError::Mailto(err.to_string()))
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Holds the submit control's own markup while the sending label replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitControl {
    saved: Option<String>,
}

impl SubmitControl {
    /// Saves `current` and returns the label to show instead. Markup saved by
    /// an earlier, unrestored send wins over `current`.
    pub fn begin(&mut self, current: String) -> &'static str {
        self.saved.get_or_insert(current);
        SENDING_LABEL
    }

    pub fn is_sending(&self) -> bool {
        self.saved.is_some()
    }

    pub fn restore(&mut self) -> Option<String> {
        self.saved.take()
    }
}
