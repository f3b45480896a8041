//! Easing curves over normalized progress
//!
//! Every curve maps `t` in [0, 1] onto [0, 1] with `f(0) = 0` and `f(1) = 1`
//! (except `None`, which holds at 0 until the end). Input outside the range
//! is clamped first.

pub use crate::config::EasingType;

/// Evaluate an [`EasingType`] at a progress value
pub trait EasingTypeExt {
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => step(t),
            EasingType::Linear => t,
            EasingType::Cubic => power_out(t, 3),
            EasingType::Quintic => power_out(t, 5),
            EasingType::EaseOut => expo_out(t),
            EasingType::CubicInOut => cubic_in_out(t),
        }
    }
}

#[inline]
fn step(t: f64) -> f64 {
    if t < 1.0 {
        0.0
    } else {
        1.0
    }
}

/// `1 - (1 - t)^n`; the scroll driver uses `n = 3`
#[inline]
fn power_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// `1 - 2^(-10t)`, snapped to 1 at the end
#[inline]
fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// `4t^3` up to the midpoint, mirrored after it
#[inline]
fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}
