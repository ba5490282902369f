//! Gesture primitives: wheel debounce and touch drag tracking.
//!
//! Pure decision logic over explicit timestamps and coordinates; nothing
//! here reads the clock or owns navigation state.

use std::time::{Duration, Instant};

/// Whether an event at `now` clears the debounce window after `last`.
///
/// A hard debounce: rejected events are dropped, never queued, and do not
/// extend the window.
#[inline]
pub fn should_accept(now: Instant, last: Option<Instant>, cooldown: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= cooldown,
    }
}

/// Debounce gate for wheel events.
///
/// Only accepted events stamp the window, so a burst of rejected events
/// cannot starve the next legitimate one.
#[derive(Debug, Clone)]
pub struct WheelGate {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl WheelGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    /// Accept or drop an event at `now`, stamping the window on accept.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if should_accept(now, self.last_accepted, self.cooldown) {
            self.last_accepted = Some(now);
            true
        } else {
            false
        }
    }

    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

/// How a completed vertical drag is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Finger moved up far enough: show the next page
    SwipeNext,
    /// Finger moved down far enough: show the previous page
    SwipePrev,
    /// Downward drag that began at scroll-top: pull-to-refresh release
    PullRelease,
    /// Sub-threshold movement, no navigation
    Tap,
}

/// Classify a finished drag by its total displacement.
///
/// `displacement` is positive when the finger moved downward. A downward
/// drag that began at scroll-top is always the pull path, never a swipe.
pub fn classify_release(displacement: f32, from_top: bool, swipe_threshold: f32) -> DragOutcome {
    if from_top && displacement > 0.0 {
        DragOutcome::PullRelease
    } else if displacement <= -swipe_threshold {
        DragOutcome::SwipeNext
    } else if displacement >= swipe_threshold {
        DragOutcome::SwipePrev
    } else {
        DragOutcome::Tap
    }
}

/// Tracks one touch interaction from press to release.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    origin_y: f32,
    current_y: f32,
    from_top: bool,
    active: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking at `y`. `at_top` records whether the viewport sat at
    /// scroll-top when the touch began; it decides pull eligibility for
    /// the whole gesture.
    pub fn start(&mut self, y: f32, at_top: bool) {
        self.origin_y = y;
        self.current_y = y;
        self.from_top = at_top;
        self.active = true;
    }

    /// Update the tracked position. Ignored when no touch is active.
    pub fn drag(&mut self, y: f32) {
        if self.active {
            self.current_y = y;
        }
    }

    /// Finish the gesture and classify it. Resets the tracker.
    pub fn release(&mut self, swipe_threshold: f32) -> DragOutcome {
        if !self.active {
            return DragOutcome::Tap;
        }
        let outcome = classify_release(self.displacement(), self.from_top, swipe_threshold);
        self.active = false;
        outcome
    }

    /// Vertical displacement since the touch began (positive = downward).
    #[inline]
    pub fn displacement(&self) -> f32 {
        self.current_y - self.origin_y
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the gesture is currently in the pull-to-refresh path.
    #[inline]
    pub fn is_pulling(&self) -> bool {
        self.active && self.from_top && self.displacement() > 0.0
    }
}
