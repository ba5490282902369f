//! Time calculation utilities for page transitions.
//!
//! Every function takes the current instant as an argument instead of
//! reading the clock, so transition math is testable without real timers.

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at `now`.
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Whether an animation that started at `start` has run its full duration.
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for pixel offsets.
#[inline]
pub fn lerp_u32(from: u32, to: u32, t: f64) -> u32 {
    lerp(from as f64, to as f64, t).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u32() {
        assert_eq!(lerp_u32(0, 600, 0.0), 0);
        assert_eq!(lerp_u32(0, 600, 0.5), 300);
        assert_eq!(lerp_u32(600, 0, 1.0), 0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_halfway() {
        let start = Instant::now();
        let now = start + Duration::from_millis(150);
        let p = progress(start, Duration::from_millis(300), now);
        assert!((p - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_is_complete_threads_now() {
        let start = Instant::now();
        let duration = Duration::from_millis(300);

        assert!(!is_complete(start, duration, start + Duration::from_millis(299)));
        assert!(is_complete(start, duration, start + Duration::from_millis(300)));
    }
}
