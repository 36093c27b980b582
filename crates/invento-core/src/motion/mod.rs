//! Motion primitives and the animation scheduler
//!
//! ## Atomic layer
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//!
//! ## Molecular layer
//! - `scheduler` - Tween and timer registry stepped by the host's frame loop

pub mod easing;
pub mod timing;

pub mod scheduler;

pub use easing::EasingType;
pub use scheduler::{AnimationScheduler, Property, Repeat, TimerHandle, TweenHandle, TweenSpec};
