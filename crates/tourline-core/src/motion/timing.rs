//! Sampling helpers shared by the motion drivers
//!
//! Nothing here reads the clock; callers pass the instant to sample at.

use std::time::{Duration, Instant};

use crate::geometry::Point;

/// Fraction of `duration` elapsed at `now`, clamped to `[0, 1]`
///
/// A zero duration is already finished.
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Component-wise [`lerp`]
#[inline]
pub fn lerp_point(from: Point, to: Point, t: f64) -> Point {
    Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_runs_both_directions() {
        assert_eq!(lerp(-4.0, 4.0, 0.5), 0.0);
        assert_eq!(lerp(20.0, 10.0, 1.0), 10.0);
        assert!((lerp(100.0, 0.0, 0.25) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_point() {
        let p = lerp_point(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 0.5);
        assert_eq!(p, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway_and_clamped() {
        let start = Instant::now();
        let duration = Duration::from_millis(1000);
        assert!((progress(start, duration, start + Duration::from_millis(250)) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, duration, start + Duration::from_secs(5)), 1.0);
        // A sample taken before the start never goes negative
        assert_eq!(progress(start + Duration::from_millis(10), duration, start), 0.0);
    }

    #[test]
    fn test_is_complete() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert!(!is_complete(start, duration, start + Duration::from_millis(99)));
        assert!(is_complete(start, duration, start + Duration::from_millis(100)));
    }
}
