//! Autoplay driver: back-and-forth sweep between 0 and the bound
//!
//! Every leg of the loop takes the configured sweep duration regardless of
//! distance. A resume after a pointer interaction covers only part of a leg,
//! so its duration is scaled to keep the same speed.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::motion::timing::scale_duration;
use crate::motion::{AnimationScheduler, TweenSpec};

use super::state::Shared;

/// Edge to resume towards from `current`
///
/// Offsets in the half nearer to 0 head for the bound, the others head back to 0.
pub fn resume_target(current: f64, min_offset: f64) -> f64 {
    if current > min_offset / 2.0 {
        min_offset
    } else {
        0.0
    }
}

/// Duration of the hop from `current` to `target` at autoplay speed
pub fn resume_duration(current: f64, target: f64, min_offset: f64, sweep: Duration) -> Duration {
    let total = min_offset.abs();
    if total == 0.0 {
        return Duration::ZERO;
    }
    scale_duration(sweep, (target - current).abs() / total)
}

/// Cancel the autoplay tween if one is running. Idempotent.
pub(crate) fn stop(shared: &Shared, scheduler: &mut AnimationScheduler) {
    if let Some(handle) = shared.autoplay.take() {
        if scheduler.kill(handle) {
            debug!("Autoplay stopped at {:.1}", shared.offset.get());
        }
    }
}

/// Start the endless loop from the current offset towards `toward`
pub(crate) fn start_loop(shared: &Shared, scheduler: &mut AnimationScheduler, toward: f64) {
    stop(shared, scheduler);

    let min_offset = shared.min_offset.get();
    if min_offset >= 0.0 {
        return;
    }

    let handle = scheduler.to(
        &shared.offset,
        TweenSpec::new(toward, shared.config.sweep_duration()).yoyo(),
    );
    shared.autoplay.set(Some(handle));
    debug!(
        "Autoplay looping {:.1} -> {:.1} (bound {:.1})",
        shared.offset.get(),
        toward,
        min_offset
    );
}

/// Initial autoplay: sweep from the start of the strip towards the bound
pub(crate) fn start(shared: &Shared, scheduler: &mut AnimationScheduler) {
    start_loop(shared, scheduler, shared.min_offset.get());
}

/// Hop to the chosen edge at autoplay speed, then continue the full loop
pub(crate) fn resume(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) {
    stop(shared, scheduler);

    let min_offset = shared.min_offset.get();
    if min_offset >= 0.0 {
        return;
    }

    let current = shared.offset.get();
    let target = resume_target(current, min_offset);
    let duration = resume_duration(current, target, min_offset, shared.config.sweep_duration());
    let next_leg = if target == 0.0 { min_offset } else { 0.0 };

    let weak = Rc::downgrade(shared);
    let handle = scheduler.to(
        &shared.offset,
        TweenSpec::new(target, duration).on_complete(move |scheduler| {
            if let Some(shared) = weak.upgrade() {
                start_loop(&shared, scheduler, next_leg);
            }
        }),
    );
    shared.autoplay.set(Some(handle));
    debug!(
        "Autoplay resuming {:.1} -> {:.1} over {:?}",
        current, target, duration
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_target_midpoint_rule() {
        assert_eq!(resume_target(-500.0, -3220.0), -3220.0);
        assert_eq!(resume_target(0.0, -3220.0), -3220.0);
        assert_eq!(resume_target(-1610.0, -3220.0), 0.0);
        assert_eq!(resume_target(-3000.0, -3220.0), 0.0);
    }

    #[test]
    fn test_resume_duration_keeps_speed() {
        let sweep = Duration::from_secs(50);
        assert_eq!(resume_duration(0.0, -1000.0, -1000.0, sweep), sweep);
        assert_eq!(
            resume_duration(-500.0, -1000.0, -1000.0, sweep),
            Duration::from_secs(25)
        );
        assert_eq!(resume_duration(-1000.0, -1000.0, -1000.0, sweep), Duration::ZERO);
    }

    #[test]
    fn test_resume_duration_without_bound_is_zero() {
        assert_eq!(
            resume_duration(0.0, 0.0, 0.0, Duration::from_secs(50)),
            Duration::ZERO
        );
    }
}
