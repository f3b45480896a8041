//! Eased motion for the simulated pointer and the document scroll
//!
//! # Layers
//!
//! ## Atomic
//! - `easing` - Pure easing functions (cubic, quintic, exponential, in-out)
//! - `timing` - Progress and interpolation against a caller-supplied clock
//!
//! ## Molecular
//! - `driver` - [`MotionDriver`] (2-D pointer) and [`ScrollDriver`] (scalar offset)
//!
//! Drivers never read the wall clock themselves: every call takes `now`, so
//! the same code runs under a real frame loop and a virtual test clock.
//!
//! ```ignore
//! use tourline_core::motion::MotionDriver;
//!
//! let mut pointer = MotionDriver::with_easing(EasingType::CubicInOut);
//! pointer.animate_to(Point::new(40.0, 12.0), Duration::from_millis(800), now);
//!
//! // Each frame
//! let sample = pointer.update(Instant::now());
//! draw_cursor(sample.value);
//! if sample.settled { /* continue the tour */ }
//! ```

pub mod driver;
pub mod easing;
pub mod timing;

pub use driver::{Animated, AnimationDriver, MotionDriver, Sample, ScrollDriver};
pub use easing::EasingTypeExt;
