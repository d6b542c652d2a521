//! Chrome that depends only on the vertical scroll offset.

use crate::config::InteractionConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollChrome {
    pub navbar_scrolled: bool,
    pub show_scroll_top: bool,
}

impl ScrollChrome {
    pub fn from_offset(scroll_y: f64, config: &InteractionConfig) -> Self {
        Self {
            navbar_scrolled: scroll_y > config.navbar_scrolled_threshold,
            show_scroll_top: scroll_y > config.scroll_top_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_from_top_to_400_reveals_both() {
        let config = InteractionConfig::default();
        assert_eq!(ScrollChrome::from_offset(0.0, &config), ScrollChrome::default());

        let chrome = ScrollChrome::from_offset(400.0, &config);
        assert!(chrome.navbar_scrolled);
        assert!(chrome.show_scroll_top);
    }

    #[test]
    fn thresholds_are_strict() {
        let config = InteractionConfig::default();
        assert!(!ScrollChrome::from_offset(50.0, &config).navbar_scrolled);
        assert!(ScrollChrome::from_offset(51.0, &config).navbar_scrolled);
        assert!(!ScrollChrome::from_offset(300.0, &config).show_scroll_top);
        assert!(ScrollChrome::from_offset(300.5, &config).show_scroll_top);
    }
}
