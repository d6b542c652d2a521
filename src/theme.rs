use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Durable string key-value storage. The browser build backs this with
/// `localStorage`.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// The opened store, or an in-memory one when opening failed. The page still
/// gets a theme; it just won't survive a reload.
pub fn store_or_memory<S>(opened: Result<S>) -> Box<dyn PreferenceStore>
where
    S: PreferenceStore + 'static,
{
    match opened {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("theme preference will not persist: {err}");
            Box::new(MemoryStore::new())
        }
    }
}

pub struct ThemePreference<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Reads the stored theme (light when absent or unreadable) and writes it
    /// straight back.
    pub fn load(store: S) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(Theme::parse).unwrap_or_default(),
            Err(err) => {
                log::warn!("theme preference unreadable, using light: {err}");
                Theme::default()
            }
        };

        let preference = Self { store, current };
        preference.persist();
        preference
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.persist();
        self.current
    }

    fn persist(&self) {
        if let Err(err) = self.store.set(THEME_KEY, self.current.as_str()) {
            log::warn!("theme preference not saved: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InteractionError;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(InteractionError::Storage("blocked".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(InteractionError::Storage("blocked".to_string()))
        }
    }

    #[test]
    fn missing_preference_defaults_to_light_and_is_persisted() {
        let preference = ThemePreference::load(MemoryStore::new());
        assert_eq!(preference.current(), Theme::Light);
        assert_eq!(
            preference.store.get(THEME_KEY).expect("readable").as_deref(),
            Some("light")
        );
    }

    #[test]
    fn stored_dark_preference_survives_reload() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "dark").expect("writable");

        let preference = ThemePreference::load(store);
        assert_eq!(preference.current(), Theme::Dark);
    }

    #[test]
    fn garbage_value_is_replaced_with_light() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "sepia").expect("writable");

        let preference = ThemePreference::load(store);
        assert_eq!(preference.current(), Theme::Light);
        assert_eq!(
            preference.store.get(THEME_KEY).expect("readable").as_deref(),
            Some("light")
        );
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut preference = ThemePreference::load(MemoryStore::new());
        assert_eq!(preference.toggle(), Theme::Dark);
        assert_eq!(
            preference.store.get(THEME_KEY).expect("readable").as_deref(),
            Some("dark")
        );
        assert_eq!(preference.toggle(), Theme::Light);
    }

    #[test]
    fn unopenable_store_falls_back_to_memory() {
        let opened: Result<BrokenStore> =
            Err(InteractionError::Storage("localStorage unavailable".to_string()));
        let mut preference = ThemePreference::load(store_or_memory(opened));

        assert_eq!(preference.current(), Theme::Light);
        assert_eq!(
            preference.store.get(THEME_KEY).expect("readable").as_deref(),
            Some("light")
        );
        assert_eq!(preference.toggle(), Theme::Dark);
        assert_eq!(
            preference.store.get(THEME_KEY).expect("readable").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn unreadable_store_still_yields_a_theme() {
        let mut preference = ThemePreference::load(BrokenStore);
        assert_eq!(preference.current(), Theme::Light);
        assert_eq!(preference.toggle(), Theme::Dark);
    }
}
