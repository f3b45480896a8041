//! Animation drivers for the pointer and the scroll offset
//!
//! Call `animate_to()` to begin an animation, then `update()` each frame to
//! get the current interpolated value. Re-targeting before an animation
//! settles starts the new animation from the live value (last writer wins).

use std::fmt::Debug;
use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, lerp_point, progress};
use crate::geometry::Point;

/// A value that can be interpolated by a driver
pub trait Animated: Copy + PartialEq + Debug {
    fn interpolate(from: Self, to: Self, t: f64) -> Self;
}

impl Animated for f64 {
    #[inline]
    fn interpolate(from: Self, to: Self, t: f64) -> Self {
        lerp(from, to, t)
    }
}

impl Animated for Point {
    #[inline]
    fn interpolate(from: Self, to: Self, t: f64) -> Self {
        lerp_point(from, to, t)
    }
}

/// Active animation state
#[derive(Debug, Clone)]
struct ActiveAnimation<T> {
    /// Animation start time
    start: Instant,
    /// Value live when the animation was started
    from: T,
    /// Target value
    to: T,
    /// Animation duration
    duration: Duration,
}

/// Value sampled by [`AnimationDriver::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    pub value: T,
    /// No animation is pending; `value` is final
    pub settled: bool,
}

/// Eased interpolation of a single value over time
#[derive(Debug, Clone)]
pub struct AnimationDriver<T> {
    animation: Option<ActiveAnimation<T>>,
    easing: EasingType,
    current: T,
}

/// Drives the simulated pointer position
pub type MotionDriver = AnimationDriver<Point>;

/// Drives the document's vertical scroll offset
pub type ScrollDriver = AnimationDriver<f64>;

impl<T: Animated + Default> AnimationDriver<T> {
    /// Create a driver resting at the default value
    pub fn with_easing(easing: EasingType) -> Self {
        Self::new(easing, T::default())
    }
}

impl<T: Animated> AnimationDriver<T> {
    pub fn new(easing: EasingType, initial: T) -> Self {
        Self {
            animation: None,
            easing,
            current: initial,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Last sampled value
    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    /// Final value once the pending animation settles
    pub fn target(&self) -> T {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    /// Instant at which the pending animation settles
    pub fn settles_at(&self) -> Option<Instant> {
        self.animation.as_ref().map(|a| a.start + a.duration)
    }

    /// Jump to a value immediately (no animation)
    pub fn set_immediate(&mut self, value: T) {
        self.animation = None;
        self.current = value;
    }

    /// Start an animation from the live value to `target`
    ///
    /// A zero duration or an unchanged target settles immediately.
    pub fn animate_to(&mut self, target: T, duration: Duration, now: Instant) {
        // Sample first so a restart begins where the value is right now
        let from = self.update(now).value;

        if duration.is_zero() || from == target {
            self.set_immediate(target);
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration,
        });
    }

    /// Update animation state and return the value at `now`
    ///
    /// Call this every frame to advance the animation.
    pub fn update(&mut self, now: Instant) -> Sample<T> {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                let eased_t = self.easing.apply(t);
                self.current = T::interpolate(anim.from, anim.to, eased_t);
            }
        }

        Sample {
            value: self.current,
            settled: self.animation.is_none(),
        }
    }

    /// Cancel any active animation and stop at the last sampled value
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}
