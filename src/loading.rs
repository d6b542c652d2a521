//! Full-screen loading overlay timeline.

pub const LOADING_LABEL: &str = "Loading...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingTimeline {
    pub hold_ms: u32,
    pub fade_ms: u32,
}

impl LoadingTimeline {
    pub fn new(hold_ms: u32, fade_ms: u32) -> Self {
        Self { hold_ms, fade_ms }
    }

    /// Phase `elapsed_ms` after the page finished loading.
    pub fn phase_at(&self, elapsed_ms: u32) -> LoadingPhase {
        if elapsed_ms < self.hold_ms {
            LoadingPhase::Visible
        } else if elapsed_ms < self.hold_ms.saturating_add(self.fade_ms) {
            LoadingPhase::Fading
        } else {
            LoadingPhase::Removed
        }
    }

    pub fn total_ms(&self) -> u32 {
        self.hold_ms.saturating_add(self.fade_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_then_fades_then_goes() {
        let timeline = LoadingTimeline::new(800, 500);
        assert_eq!(timeline.phase_at(0), LoadingPhase::Visible);
        assert_eq!(timeline.phase_at(799), LoadingPhase::Visible);
        assert_eq!(timeline.phase_at(800), LoadingPhase::Fading);
        assert_eq!(timeline.phase_at(1_299), LoadingPhase::Fading);
        assert_eq!(timeline.phase_at(1_300), LoadingPhase::Removed);
        assert_eq!(timeline.total_ms(), 1_300);
    }

    #[test]
    fn zero_fade_skips_straight_to_removed() {
        let timeline = LoadingTimeline::new(800, 0);
        assert_eq!(timeline.phase_at(800), LoadingPhase::Removed);
    }
}
