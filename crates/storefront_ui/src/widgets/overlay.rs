//! Shared closing rules for popup widgets

use crate::event::{Event, KeyCode};
use crate::layout::Bounds;

/// Decides when an open popup should close.
pub struct OverlayCloseHelper;

impl OverlayCloseHelper {
    /// A press at `position` closes the popup unless it lands inside `region`
    #[inline]
    pub fn is_outside(position: (f32, f32), region: Bounds) -> bool {
        !region.contains(position.0, position.1)
    }

    /// Escape and window focus loss close any popup
    #[inline]
    pub fn should_close_on_event(event: &Event) -> bool {
        matches!(
            event,
            Event::KeyPress {
                key: KeyCode::Escape,
                ..
            } | Event::FocusLost
        )
    }
}
