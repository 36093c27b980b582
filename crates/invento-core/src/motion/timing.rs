//! Time calculation utilities for tweens
//!
//! Time is always passed in explicitly so the scheduler can be stepped with
//! synthetic instants.

use std::time::Duration;

/// Calculate progress (0.0 to 1.0) of `elapsed` over `duration`
///
/// A zero duration is complete immediately.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Position inside a back-and-forth cycle
///
/// Returns the leg-local progress in [0, 1] and whether the current leg
/// runs backwards (`to` towards `from`).
#[inline]
pub fn yoyo_phase(elapsed: Duration, leg: Duration) -> (f64, bool) {
    if leg.is_zero() {
        return (1.0, false);
    }
    let legs = elapsed.as_secs_f64() / leg.as_secs_f64();
    let index = legs.floor();
    let reversed = (index as u64) % 2 == 1;
    (legs - index, reversed)
}

/// Scale a duration by a ratio in [0, 1]
#[inline]
pub fn scale_duration(duration: Duration, ratio: f64) -> Duration {
    duration.mul_f64(ratio.clamp(0.0, 1.0))
}
