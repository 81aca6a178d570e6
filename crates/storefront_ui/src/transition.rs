//! Timed reveal/collapse transition for popups
//!
//! Only the direction and start of the animation are stored. The extent being
//! revealed is supplied by the caller at sample time, so it can never drift
//! out of sync with the content it describes.

use crate::constants::REVEAL_DURATION;
use web_time::Instant;

/// Where a popup is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealDirection {
    Opening,
    Closing,
}

/// Progress of a popup between fully collapsed (0.0) and fully revealed (1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTransition {
    direction: RevealDirection,
    started: Option<Instant>,
    /// Progress at the moment the current animation started
    from: f32,
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self::collapsed()
    }
}

impl RevealTransition {
    /// Fully collapsed, not animating
    pub fn collapsed() -> Self {
        Self {
            direction: RevealDirection::Closing,
            started: None,
            from: 0.0,
        }
    }

    /// Start revealing from wherever the animation currently is
    pub fn open(&mut self, now: Instant) {
        self.retarget(RevealDirection::Opening, now);
    }

    /// Start collapsing from wherever the animation currently is
    pub fn close(&mut self, now: Instant) {
        self.retarget(RevealDirection::Closing, now);
    }

    fn retarget(&mut self, direction: RevealDirection, now: Instant) {
        if self.direction == direction {
            return;
        }
        self.from = self.progress(now);
        self.direction = direction;
        self.started = Some(now);
    }

    /// Eased progress in `0.0..=1.0` at time `now`
    pub fn progress(&self, now: Instant) -> f32 {
        let target = match self.direction {
            RevealDirection::Opening => 1.0,
            RevealDirection::Closing => 0.0,
        };
        let Some(started) = self.started else {
            return target;
        };

        let t = (now.saturating_duration_since(started).as_secs_f32() / REVEAL_DURATION.as_secs_f32())
            .clamp(0.0, 1.0);
        self.from + (target - self.from) * ease_in_out(t)
    }

    /// Revealed portion of `extent` at time `now`
    pub fn extent(&self, extent: f32, now: Instant) -> f32 {
        extent * self.progress(now)
    }

    /// Whether anything is visible at time `now`
    pub fn is_visible(&self, now: Instant) -> bool {
        self.progress(now) > 0.0
    }
}

/// Cubic ease-in-out
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = -2.0 * t + 2.0;
        1.0 - f * f * f / 2.0
    }
}
