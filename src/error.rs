use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("mailto error: {0}")]
    Mailto(String),
}

impl InteractionError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for InteractionError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(message)
    }
}

pub type Result<T> = std::result::Result<T, InteractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_converts_into_config_variant() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: InteractionError = json_err.into();
        assert!(matches!(err, InteractionError::Config(_)));
        assert!(err.to_string().starts_with("config error: "));
    }

    #[test]
    fn error_display() {
        let err = InteractionError::missing("#navbar");
        assert_eq!(err.to_string(), "missing element: #navbar");

        let err = InteractionError::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "storage error: quota exceeded");

        let err = InteractionError::Mailto("relative URL without a base".to_string());
        assert_eq!(err.to_string(), "mailto error: relative URL without a base");
    }
}
