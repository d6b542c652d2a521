//! Section tracking and mobile menu state for the nav bar.

#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open: a position on the boundary belongs to the next section.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// First section in document order whose span contains the probe line.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, probe_offset: f64) -> Option<&str> {
    let probe = scroll_y + probe_offset;
    sections
        .iter()
        .find(|section| section.contains(probe))
        .map(|section| section.id.as_str())
}

/// Viewport offset that puts `section_top` just below the fixed header.
pub fn scroll_target(section_top: f64, header_offset: f64) -> f64 {
    section_top - header_offset
}

/// Section id for an in-page `#id` link.
pub fn link_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    active: Option<String>,
    menu_open: bool,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns the new open state. The page scroll lock follows it.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Returns whether the menu was open before.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    pub fn on_resize(&mut self, viewport_width: f64, breakpoint: f64) -> bool {
        if viewport_width > breakpoint {
            self.close_menu()
        } else {
            false
        }
    }

    /// Recomputes the active link. With no matching section the previous
    /// link stays active. Returns whether the active link changed.
    pub fn update_active(
        &mut self,
        sections: &[SectionSpan],
        scroll_y: f64,
        probe_offset: f64,
    ) -> bool {
        let Some(current) = active_section(sections, scroll_y, probe_offset) else {
            return false;
        };

        if self.active.as_deref() == Some(current) {
            return false;
        }

        self.active = Some(current.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("home", 0.0, 700.0),
            SectionSpan::new("about", 700.0, 600.0),
            SectionSpan::new("projects", 1300.0, 900.0),
            SectionSpan::new("contact", 2200.0, 500.0),
        ]
    }

    #[test]
    fn probe_line_sits_below_scroll_offset() {
        let sections = page();
        assert_eq!(active_section(&sections, 0.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 599.0, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 600.0, 100.0), Some("about"));
        assert_eq!(active_section(&sections, 2599.0, 100.0), Some("contact"));
        assert_eq!(active_section(&sections, 2600.0, 100.0), None);
    }

    #[test]
    fn overlapping_sections_prefer_document_order() {
        let sections = vec![
            SectionSpan::new("first", 0.0, 500.0),
            SectionSpan::new("second", 200.0, 500.0),
        ];
        assert_eq!(active_section(&sections, 250.0, 100.0), Some("first"));
    }

    #[test]
    fn exactly_one_link_active_across_offsets() {
        let sections = page();
        let mut nav = NavState::new();
        let mut y = 0.0;
        while y < 2600.0 {
            nav.update_active(&sections, y, 100.0);
            assert_eq!(nav.active(), active_section(&sections, y, 100.0));
            y += 37.0;
        }
    }

    #[test]
    fn active_link_retained_when_no_section_matches() {
        let sections = page();
        let mut nav = NavState::new();
        assert!(nav.update_active(&sections, 2300.0, 100.0));
        assert!(!nav.update_active(&sections, 5000.0, 100.0));
        assert_eq!(nav.active(), Some("contact"));
        assert!(!nav.update_active(&sections, 2300.0, 100.0));
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut nav = NavState::new();
        assert!(nav.toggle_menu());
        assert!(nav.is_menu_open());
        assert!(nav.close_menu());
        assert!(!nav.close_menu());
        assert!(nav.toggle_menu());
        assert!(!nav.toggle_menu());
    }

    #[test]
    fn resize_above_breakpoint_closes_menu() {
        let mut nav = NavState::new();
        nav.toggle_menu();
        assert!(!nav.on_resize(768.0, 768.0));
        assert!(nav.is_menu_open());
        assert!(nav.on_resize(1024.0, 768.0));
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn link_targets_and_scroll_offsets() {
        assert_eq!(link_target("#projects"), Some("projects"));
        assert_eq!(link_target("#"), None);
        assert_eq!(link_target("https://github.com"), None);
        assert_eq!(scroll_target(1300.0, 80.0), 1220.0);
    }
}
