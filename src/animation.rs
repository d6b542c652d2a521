//! Entrance, hover, title and counter animation math.
//!
//! Nothing here touches the DOM. The frontend feeds ticks in and writes the
//! returned text or style values out.

/// Elements that fade in the first time they scroll into view.
pub const REVEAL_SELECTOR: &str =
    ".section-title, .about-content, .project-card, .skill-category, .timeline-item, .contact-content";

pub const REVEALED_CLASS: &str = "animate-in";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEffect {
    ProjectCard,
    SkillItem,
}

impl HoverEffect {
    pub const ALL: [Self; 2] = [Self::ProjectCard, Self::SkillItem];

    pub fn selector(self) -> &'static str {
        match self {
            Self::ProjectCard => ".project-card",
            Self::SkillItem => ".skill-item",
        }
    }

    pub fn transform(self) -> &'static str {
        match self {
            Self::ProjectCard => "translateY(-10px)",
            Self::SkillItem => "translateY(-5px) scale(1.02)",
        }
    }
}

/// Start delay for each title line, in milliseconds after load.
pub fn title_line_delays(lines: usize, lead_in_ms: u32, stagger_ms: u32) -> Vec<u32> {
    (0..lines)
        .map(|index| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            lead_in_ms.saturating_add(stagger_ms.saturating_mul(index))
        })
        .collect()
}

/// Leading integer of a stat label such as `"25+"` or `"3 years"`.
pub fn parse_counter_target(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// `3` always gets the suffix alongside everything above ten. Kept as the
/// page has always rendered it.
pub fn counter_suffix(target: u32) -> &'static str {
    if target > 10 || target == 3 {
        "+"
    } else {
        ""
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    Running(String),
    Done(String),
}

impl CounterFrame {
    pub fn text(&self) -> &str {
        match self {
            Self::Running(text) | Self::Done(text) => text,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Count-up from zero in fixed increments of `target / steps`.
#[derive(Clone, Debug)]
pub struct Counter {
    target: u32,
    increment: f64,
    current: f64,
}

impl Counter {
    pub fn new(target: u32, steps: u32) -> Self {
        Self {
            target,
            increment: f64::from(target) / f64::from(steps.max(1)),
            current: 0.0,
        }
    }

    pub fn tick(&mut self) -> CounterFrame {
        self.current += self.increment;
        let suffix = counter_suffix(self.target);

        if self.current >= f64::from(self.target) {
            CounterFrame::Done(format!("{}{suffix}", self.target))
        } else {
            CounterFrame::Running(format!("{}{suffix}", self.current.floor()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: u32) -> (usize, String) {
        let mut counter = Counter::new(target, 60);
        let mut ticks = 0;
        loop {
            ticks += 1;
            let frame = counter.tick();
            if frame.is_done() {
                return (ticks, frame.text().to_string());
            }
            assert!(ticks < 1_000, "counter never finished");
        }
    }

    #[test]
    fn suffix_boundaries() {
        assert_eq!(run_to_end(3).1, "3+");
        assert_eq!(run_to_end(10).1, "10");
        assert_eq!(run_to_end(11).1, "11+");
        assert_eq!(run_to_end(25).1, "25+");
        assert_eq!(run_to_end(2).1, "2");
    }

    #[test]
    fn finishes_in_about_sixty_ticks() {
        let (ticks, _) = run_to_end(150);
        assert!((60..=61).contains(&ticks));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        assert_eq!(run_to_end(0), (1, "0".to_string()));
    }

    #[test]
    fn running_frames_are_floored() {
        let mut counter = Counter::new(120, 60);
        assert_eq!(counter.tick(), CounterFrame::Running("2+".to_string()));
        let mut counter = Counter::new(30, 60);
        assert_eq!(counter.tick(), CounterFrame::Running("0+".to_string()));
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_counter_target("25+"), Some(25));
        assert_eq!(parse_counter_target("  3"), Some(3));
        assert_eq!(parse_counter_target("10 years"), Some(10));
        assert_eq!(parse_counter_target("many"), None);
        assert_eq!(parse_counter_target(""), None);
    }

    #[test]
    fn title_lines_are_staggered() {
        assert_eq!(title_line_delays(3, 500, 200), vec![500, 700, 900]);
        assert!(title_line_delays(0, 500, 200).is_empty());
    }

    #[test]
    fn hover_effects_have_distinct_targets() {
        assert_eq!(HoverEffect::ProjectCard.transform(), "translateY(-10px)");
        assert_ne!(
            HoverEffect::ALL[0].selector(),
            HoverEffect::ALL[1].selector()
        );
    }
}
