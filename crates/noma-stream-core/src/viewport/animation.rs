//! Page transition animator.
//!
//! Interpolates the viewport's pixel offset between page boundaries. The
//! controller starts a transition with `scroll_to()` and calls `tick()`
//! every frame; the tick that completes the duration snaps the offset to
//! the target and reports the settle.

use std::time::{Duration, Instant};

use super::timing::{is_complete, lerp_u32, progress};
use crate::config::{EasingType, ScrollConfig};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u32,
    to: u32,
    duration: Duration,
    easing: EasingType,
}

/// Animates the pixel offset of the paged viewport.
#[derive(Debug, Clone)]
pub struct PageAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_offset: u32,
}

impl PageAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_offset: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current interpolated pixel offset.
    #[inline]
    pub fn current_offset(&self) -> u32 {
        self.current_offset
    }

    /// Final offset once the active transition completes.
    pub fn target_offset(&self) -> u32 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_offset)
    }

    /// Set the offset immediately, cancelling any transition.
    pub fn set_offset(&mut self, offset: u32) {
        self.animation = None;
        self.current_offset = offset;
    }

    /// Begin a transition toward `target`.
    ///
    /// With smooth scrolling disabled (or a zero duration) this jumps
    /// immediately and reports `false`; otherwise a transition starts and
    /// the caller drives it with `tick()`. Returns whether a transition
    /// is now running.
    pub fn scroll_to(&mut self, target: u32, now: Instant) -> bool {
        if !self.config.is_smooth() {
            self.set_offset(target);
            return false;
        }

        let from = self.current_offset;
        if from == target {
            self.animation = None;
            return false;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
        true
    }

    /// Advance the transition to `now` and return `true` on the tick that
    /// settles it.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = self.animation.as_ref() else {
            return false;
        };

        if is_complete(anim.start, anim.duration, now) {
            self.current_offset = anim.to;
            self.animation = None;
            return true;
        }

        let t = progress(anim.start, anim.duration, now);
        let eased = anim.easing.apply(t);
        self.current_offset = lerp_u32(anim.from, anim.to, eased);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth_config(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_jump_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = PageAnimator::new(config);

        let animating = animator.scroll_to(600, Instant::now());

        assert!(!animating);
        assert_eq!(animator.current_offset(), 600);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_transition_interpolates_and_settles() {
        let mut animator = PageAnimator::new(ScrollConfig {
            easing: crate::config::EasingType::Linear,
            ..smooth_config(300)
        });
        let start = Instant::now();

        assert!(animator.scroll_to(600, start));

        let settled = animator.tick(start + Duration::from_millis(150));
        assert!(!settled);
        assert_eq!(animator.current_offset(), 300);

        let settled = animator.tick(start + Duration::from_millis(300));
        assert!(settled);
        assert_eq!(animator.current_offset(), 600);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_settle_reported_once() {
        let mut animator = PageAnimator::new(smooth_config(100));
        let start = Instant::now();
        animator.scroll_to(600, start);

        assert!(animator.tick(start + Duration::from_millis(100)));
        assert!(!animator.tick(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_retarget_starts_from_current_offset() {
        let mut animator = PageAnimator::new(ScrollConfig {
            easing: crate::config::EasingType::Linear,
            ..smooth_config(300)
        });
        let start = Instant::now();
        animator.scroll_to(600, start);
        animator.tick(start + Duration::from_millis(150));

        // Reverse mid-flight: the new transition begins at the
        // interpolated offset, not the old origin or target.
        animator.scroll_to(0, start + Duration::from_millis(150));
        assert_eq!(animator.target_offset(), 0);
        animator.tick(start + Duration::from_millis(150));
        assert!(animator.current_offset() <= 300);
    }

    #[test]
    fn test_scroll_to_current_offset_is_noop() {
        let mut animator = PageAnimator::new(smooth_config(300));
        animator.set_offset(600);

        assert!(!animator.scroll_to(600, Instant::now()));
        assert!(!animator.is_animating());
    }
}
