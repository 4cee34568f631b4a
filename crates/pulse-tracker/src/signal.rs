//! Activity and lifecycle signals fed into the tracker.

use crate::machine::Trigger;

/// A raw signal from the hosting environment (DOM events, window
/// lifecycle, connectivity probes). The tracker collapses these into
/// machine [`Trigger`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Pointer movement.
    PointerMove,
    /// Key press.
    KeyPress,
    /// Scroll.
    Scroll,
    /// Touch interaction.
    Touch,
    /// The window regained input focus.
    FocusGained,
    /// The page/window became hidden.
    Hidden,
    /// The page/window became visible.
    Visible,
    /// Network reachability was lost.
    ConnectivityLost,
}

impl Signal {
    /// The machine trigger this signal maps to.
    pub fn trigger(&self) -> Trigger {
        match self {
            Self::PointerMove | Self::KeyPress | Self::Scroll | Self::Touch | Self::FocusGained => {
                Trigger::Activity
            }
            Self::Hidden => Trigger::Hidden,
            Self::Visible => Trigger::Visible,
            Self::ConnectivityLost => Trigger::ConnectivityLost,
        }
    }
}
