//! # pulse-indicator
//!
//! Pure rendering of a subject's online status as a small badge. No
//! network, no timers, no state: [`render`] is a total function of its
//! props, and unrecognized inputs fail closed to defaults because a leaf
//! rendering component has no caller-visible recovery path.

use serde::{Deserialize, Serialize};

/// Badge size options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeSize {
    /// 8px glyph, for dense lists.
    Small,
    /// 12px glyph, the default.
    #[default]
    Medium,
    /// 16px glyph, for profile headers.
    Large,
}

impl BadgeSize {
    /// Parses from a string, failing closed to `Medium`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "small" => Self::Small,
            "large" => Self::Large,
            _ => Self::Medium,
        }
    }

    /// Glyph diameter in pixels.
    pub fn diameter_px(&self) -> u32 {
        match self {
            Self::Small => 8,
            Self::Medium => 12,
            Self::Large => 16,
        }
    }
}

/// Inputs to the indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorProps {
    /// Whether the subject is online.
    pub is_online: bool,
    /// Badge size.
    #[serde(default)]
    pub size: BadgeSize,
    /// Whether to render a gray badge for offline subjects. Off by
    /// default: absent subjects render nothing at all.
    #[serde(default)]
    pub show_offline: bool,
}

impl IndicatorProps {
    /// Props for an online/offline subject with all defaults.
    pub fn new(is_online: bool) -> Self {
        Self {
            is_online,
            size: BadgeSize::default(),
            show_offline: false,
        }
    }

    /// Props straight from a store query answer.
    pub fn from_query(query: &pulse_core::presence::PresenceQueryResult) -> Self {
        Self::new(query.is_online)
    }

    /// Override the badge size.
    pub fn size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    /// Render a gray badge instead of nothing when offline.
    pub fn show_offline(mut self, show: bool) -> Self {
        self.show_offline = show;
        self
    }
}

/// The rendered badge: a filled circular glyph plus an accessible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Glyph diameter in pixels.
    pub diameter_px: u32,
    /// Fill color (CSS hex).
    pub color: &'static str,
    /// Pulsing attention treatment; reserved for the online state.
    pub pulse: bool,
    /// Accessible textual label.
    pub label: &'static str,
}

const ONLINE_COLOR: &str = "#22c55e";
const OFFLINE_COLOR: &str = "#9ca3af";

/// Render the badge for `props`, or `None` when there is nothing to show
/// (offline subject with `show_offline` off).
pub fn render(props: IndicatorProps) -> Option<Badge> {
    if !props.is_online && !props.show_offline {
        return None;
    }

    Some(if props.is_online {
        Badge {
            diameter_px: props.size.diameter_px(),
            color: ONLINE_COLOR,
            pulse: true,
            label: "Active now",
        }
    } else {
        Badge {
            diameter_px: props.size.diameter_px(),
            color: OFFLINE_COLOR,
            pulse: false,
            label: "Offline",
        }
    })
}
