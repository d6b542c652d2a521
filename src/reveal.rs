//! One-shot visibility bookkeeping.
//!
//! Elements are registered with a callback and handed back exactly once, the
//! first time they become visible. After that they are no longer tracked.

use crate::config::InteractionConfig;

/// Keys only need equality, which lets DOM handles act as keys directly.
pub struct OneShotRegistry<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> OneShotRegistry<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Re-registering a key replaces its callback.
    pub fn register(&mut self, key: K, value: V) {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn take(&mut self, key: &K) -> Option<V> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.swap_remove(index).1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V> Default for OneShotRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    /// Entrance animations: trigger at 10% visibility, a little before the
    /// element reaches the bottom edge.
    pub fn reveal(config: &InteractionConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            root_margin: config.reveal_root_margin.clone(),
        }
    }

    pub fn counter(config: &InteractionConfig) -> Self {
        Self {
            threshold: config.counter_threshold,
            root_margin: "0px".to_string(),
        }
    }

    pub fn lazy_image() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_hands_back_value_once() {
        let mut registry = OneShotRegistry::new();
        registry.register("about", 1);
        registry.register("skills", 2);

        assert_eq!(registry.take(&"about"), Some(1));
        assert_eq!(registry.take(&"about"), None);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&"skills"));
    }

    #[test]
    fn re_register_replaces_without_duplicating() {
        let mut registry = OneShotRegistry::new();
        registry.register(7_u32, "first");
        registry.register(7_u32, "second");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.take(&7), Some("second"));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut registry: OneShotRegistry<&str, ()> = OneShotRegistry::default();
        assert_eq!(registry.take(&"missing"), None);
    }

    #[test]
    fn presets_follow_config() {
        let config = InteractionConfig::default();
        let reveal = ObserverOptions::reveal(&config);
        assert_eq!(reveal.threshold, 0.1);
        assert_eq!(reveal.root_margin, "0px 0px -50px 0px");
        assert_eq!(ObserverOptions::counter(&config).threshold, 0.5);
        assert_eq!(ObserverOptions::lazy_image().threshold, 0.0);
    }
}
