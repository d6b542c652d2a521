//! Page-wide tunables.
//!
//! Every number the controllers use lives here with its default. A page may
//! override any of them through a JSON blob; values outside their bounds fall
//! back to the default instead of failing the whole config.

use serde::Deserialize;

use crate::error::Result;

pub const CONFIG_ELEMENT_ID: &str = "interactions-config";

const DEFAULT_HEADER_OFFSET: f64 = 80.0;
const DEFAULT_SECTION_PROBE_OFFSET: f64 = 100.0;
const DEFAULT_NAVBAR_SCROLLED_THRESHOLD: f64 = 50.0;
const DEFAULT_SCROLL_TOP_THRESHOLD: f64 = 300.0;
const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;
const DEFAULT_SEND_DELAY_MS: u32 = 1_000;
const DEFAULT_SUCCESS_BANNER_MS: u32 = 5_000;
const DEFAULT_LOADING_HOLD_MS: u32 = 800;
const DEFAULT_LOADING_FADE_MS: u32 = 500;
const DEFAULT_TITLE_LEAD_IN_MS: u32 = 500;
const DEFAULT_TITLE_STAGGER_MS: u32 = 200;
const DEFAULT_COUNTER_TICK_MS: u32 = 16;
const DEFAULT_COUNTER_STEPS: u32 = 60;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
const DEFAULT_CONTACT_RECIPIENT: &str = "hello@example.com";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 100_000.0);
const BREAKPOINT_BOUNDS: (f64, f64) = (320.0, 4_096.0);
const RATE_LIMIT_MS_BOUNDS: (u32, u32) = (1, 5_000);
const DELAY_MS_BOUNDS: (u32, u32) = (0, 60_000);
const COUNTER_STEPS_BOUNDS: (u32, u32) = (1, 1_000);
const RATIO_BOUNDS: (f64, f64) = (0.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub header_offset: f64,
    pub section_probe_offset: f64,
    pub navbar_scrolled_threshold: f64,
    pub scroll_top_threshold: f64,
    pub mobile_breakpoint: f64,
    pub scroll_throttle_ms: u32,
    pub resize_debounce_ms: u32,
    pub send_delay_ms: u32,
    pub success_banner_ms: u32,
    pub loading_hold_ms: u32,
    pub loading_fade_ms: u32,
    pub title_lead_in_ms: u32,
    pub title_stagger_ms: u32,
    pub counter_tick_ms: u32,
    pub counter_steps: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub counter_threshold: f64,
    pub contact_recipient: String,
    pub loading_screen: bool,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            section_probe_offset: DEFAULT_SECTION_PROBE_OFFSET,
            navbar_scrolled_threshold: DEFAULT_NAVBAR_SCROLLED_THRESHOLD,
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
            success_banner_ms: DEFAULT_SUCCESS_BANNER_MS,
            loading_hold_ms: DEFAULT_LOADING_HOLD_MS,
            loading_fade_ms: DEFAULT_LOADING_FADE_MS,
            title_lead_in_ms: DEFAULT_TITLE_LEAD_IN_MS,
            title_stagger_ms: DEFAULT_TITLE_STAGGER_MS,
            counter_tick_ms: DEFAULT_COUNTER_TICK_MS,
            counter_steps: DEFAULT_COUNTER_STEPS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_string(),
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            contact_recipient: DEFAULT_CONTACT_RECIPIENT.to_string(),
            loading_screen: false,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Wire shape of the override blob. Every field is optional so a page only
/// lists what it changes.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    header_offset: Option<f64>,
    section_probe_offset: Option<f64>,
    navbar_scrolled_threshold: Option<f64>,
    scroll_top_threshold: Option<f64>,
    mobile_breakpoint: Option<f64>,
    scroll_throttle_ms: Option<u32>,
    resize_debounce_ms: Option<u32>,
    send_delay_ms: Option<u32>,
    success_banner_ms: Option<u32>,
    loading_hold_ms: Option<u32>,
    loading_fade_ms: Option<u32>,
    title_lead_in_ms: Option<u32>,
    title_stagger_ms: Option<u32>,
    counter_tick_ms: Option<u32>,
    counter_steps: Option<u32>,
    reveal_threshold: Option<f64>,
    reveal_root_margin: Option<String>,
    counter_threshold: Option<f64>,
    contact_recipient: Option<String>,
    loading_screen: Option<bool>,
    log_level: Option<String>,
}

impl InteractionConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            header_offset: with_bounds(raw.header_offset, DEFAULT_HEADER_OFFSET, OFFSET_BOUNDS),
            section_probe_offset: with_bounds(
                raw.section_probe_offset,
                DEFAULT_SECTION_PROBE_OFFSET,
                OFFSET_BOUNDS,
            ),
            navbar_scrolled_threshold: with_bounds(
                raw.navbar_scrolled_threshold,
                DEFAULT_NAVBAR_SCROLLED_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            scroll_top_threshold: with_bounds(
                raw.scroll_top_threshold,
                DEFAULT_SCROLL_TOP_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            mobile_breakpoint: with_bounds(
                raw.mobile_breakpoint,
                DEFAULT_MOBILE_BREAKPOINT,
                BREAKPOINT_BOUNDS,
            ),
            scroll_throttle_ms: with_bounds(
                raw.scroll_throttle_ms,
                DEFAULT_SCROLL_THROTTLE_MS,
                RATE_LIMIT_MS_BOUNDS,
            ),
            resize_debounce_ms: with_bounds(
                raw.resize_debounce_ms,
                DEFAULT_RESIZE_DEBOUNCE_MS,
                RATE_LIMIT_MS_BOUNDS,
            ),
            send_delay_ms: with_bounds(raw.send_delay_ms, DEFAULT_SEND_DELAY_MS, DELAY_MS_BOUNDS),
            success_banner_ms: with_bounds(
                raw.success_banner_ms,
                DEFAULT_SUCCESS_BANNER_MS,
                DELAY_MS_BOUNDS,
            ),
            loading_hold_ms: with_bounds(
                raw.loading_hold_ms,
                DEFAULT_LOADING_HOLD_MS,
                DELAY_MS_BOUNDS,
            ),
            loading_fade_ms: with_bounds(
                raw.loading_fade_ms,
                DEFAULT_LOADING_FADE_MS,
                DELAY_MS_BOUNDS,
            ),
            title_lead_in_ms: with_bounds(
                raw.title_lead_in_ms,
                DEFAULT_TITLE_LEAD_IN_MS,
                DELAY_MS_BOUNDS,
            ),
            title_stagger_ms: with_bounds(
                raw.title_stagger_ms,
                DEFAULT_TITLE_STAGGER_MS,
                DELAY_MS_BOUNDS,
            ),
            counter_tick_ms: with_bounds(
                raw.counter_tick_ms,
                DEFAULT_COUNTER_TICK_MS,
                RATE_LIMIT_MS_BOUNDS,
            ),
            counter_steps: with_bounds(
                raw.counter_steps,
                DEFAULT_COUNTER_STEPS,
                COUNTER_STEPS_BOUNDS,
            ),
            reveal_threshold: with_bounds(
                raw.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                RATIO_BOUNDS,
            ),
            reveal_root_margin: non_empty(raw.reveal_root_margin)
                .unwrap_or_else(|| DEFAULT_REVEAL_ROOT_MARGIN.to_string()),
            counter_threshold: with_bounds(
                raw.counter_threshold,
                DEFAULT_COUNTER_THRESHOLD,
                RATIO_BOUNDS,
            ),
            contact_recipient: non_empty(raw.contact_recipient)
                .filter(|value| value.contains('@'))
                .unwrap_or_else(|| DEFAULT_CONTACT_RECIPIENT.to_string()),
            loading_screen: raw.loading_screen.unwrap_or(false),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

fn with_bounds<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T)) -> T {
    value
        .filter(|value| bounds.0 <= *value && *value <= bounds.1)
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = InteractionConfig::from_json("{}").expect("empty config parses");
        assert_eq!(config, InteractionConfig::default());
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.scroll_throttle_ms, 16);
        assert_eq!(config.resize_debounce_ms, 250);
        assert!(!config.loading_screen);
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = InteractionConfig::from_json(
            r#"{"headerOffset": 64, "sendDelayMs": 0, "loadingScreen": true, "logLevel": "DEBUG"}"#,
        )
        .expect("config parses");

        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.send_delay_ms, 0);
        assert!(config.loading_screen);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = InteractionConfig::from_json(
            r#"{"mobileBreakpoint": 10, "scrollThrottleMs": 0, "revealThreshold": 1.5, "counterSteps": 0}"#,
        )
        .expect("config parses");

        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.scroll_throttle_ms, 16);
        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.counter_steps, 60);
    }

    #[test]
    fn blank_strings_and_unknown_levels_fall_back() {
        let config = InteractionConfig::from_json(
            r#"{"contactRecipient": "   ", "revealRootMargin": "", "logLevel": "verbose"}"#,
        )
        .expect("config parses");

        assert_eq!(config.contact_recipient, DEFAULT_CONTACT_RECIPIENT);
        assert_eq!(config.reveal_root_margin, DEFAULT_REVEAL_ROOT_MARGIN);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(InteractionConfig::from_json("{\"headerOffset\": ").is_err());
        assert!(InteractionConfig::from_json(r#"{"headerOffset": "eighty"}"#).is_err());
    }

    #[test]
    fn log_level_maps_onto_log_crate() {
        assert_eq!(LogLevel::Warn.to_level(), log::Level::Warn);
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::Error.as_str(), "error");
    }
}
