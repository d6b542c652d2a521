use web_sys::Storage;

use super::dom::{browser_window, document};
use crate::error::{InteractionError, Result};
use crate::theme::{store_or_memory, PreferenceStore, Theme, ThemePreference, THEME_ATTRIBUTE};

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self> {
        let storage = browser_window()?
            .local_storage()
            .map_err(|err| InteractionError::Storage(format!("{err:?}")))?
            .ok_or_else(|| InteractionError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| InteractionError::Storage(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| InteractionError::Storage(format!("{err:?}")))
    }
}

fn apply_theme(theme: Theme) {
    if let Some(root) = document().ok().and_then(|doc| doc.document_element()) {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

pub struct ThemeController {
    preference: ThemePreference<Box<dyn PreferenceStore>>,
}

impl ThemeController {
    pub fn new() -> Result<Self> {
        let preference = ThemePreference::load(store_or_memory(LocalStorageStore::open()));
        apply_theme(preference.current());
        Ok(Self { preference })
    }

    pub fn current(&self) -> Theme {
        self.preference.current()
    }

    /// Not bound to any control on the current page.
    pub fn toggle(&mut self) -> Theme {
        let next = self.preference.toggle();
        apply_theme(next);
        next
    }
}
