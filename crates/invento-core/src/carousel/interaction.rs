//! Pointer interaction layer: hover, wheel and drag over the carousel

use std::rc::{Rc, Weak};

use tracing::trace;

use crate::motion::{AnimationScheduler, TweenSpec};

use super::autoplay;
use super::bounds::clamp_offset;
use super::events::{EventBus, EventKind, InputEvent, Propagation, Subscription};
use super::state::{Cursor, DragOrigin, Shared};

/// True when a wheel gesture at `current` pushes further past a bound
///
/// Such gestures are left to the page so it keeps scrolling vertically.
pub fn wheel_passes_through(current: f64, min_offset: f64, delta_y: f64) -> bool {
    let at_start = current >= 0.0 && delta_y < 0.0;
    let at_end = current <= min_offset && delta_y > 0.0;
    at_start || at_end
}

pub(crate) fn on_pointer_enter(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) -> Propagation {
    shared.hovering.set(true);
    autoplay::stop(shared, scheduler);
    Propagation::Continue
}

pub(crate) fn on_pointer_leave(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) -> Propagation {
    shared.hovering.set(false);
    shared.drag.set(None);
    shared.cursor.set(Cursor::Grab);
    autoplay::resume(shared, scheduler);
    Propagation::Continue
}

pub(crate) fn on_wheel(
    shared: &Rc<Shared>,
    scheduler: &mut AnimationScheduler,
    delta_y: f64,
) -> Propagation {
    if !shared.hovering.get() {
        return Propagation::Continue;
    }

    let current = shared.offset.get();
    let min_offset = shared.min_offset.get();
    if wheel_passes_through(current, min_offset, delta_y) {
        trace!("Wheel {:.1} passed through at {:.1}", delta_y, current);
        return Propagation::Continue;
    }

    let target = clamp_offset(current - delta_y * shared.config.wheel_scale, min_offset);
    scheduler.to(
        &shared.offset,
        TweenSpec::new(target, shared.config.wheel_tween_duration())
            .easing(shared.config.wheel_easing),
    );
    trace!("Wheel {:.1} moves strip {:.1} -> {:.1}", delta_y, current, target);
    Propagation::Stop
}

pub(crate) fn on_pointer_down(shared: &Rc<Shared>, x: f64) -> Propagation {
    if !shared.hovering.get() {
        return Propagation::Continue;
    }

    shared.drag.set(Some(DragOrigin {
        pointer_x: x,
        offset_at_start: shared.offset.get(),
    }));
    shared.cursor.set(Cursor::Grabbing);
    Propagation::Stop
}

pub(crate) fn on_pointer_move(
    shared: &Rc<Shared>,
    scheduler: &mut AnimationScheduler,
    x: f64,
) -> Propagation {
    if let Some(origin) = shared.drag.get() {
        let offset = clamp_offset(
            origin.offset_at_start + (x - origin.pointer_x),
            shared.min_offset.get(),
        );
        scheduler.set(&shared.offset, offset);
    }
    Propagation::Continue
}

pub(crate) fn on_pointer_up(shared: &Rc<Shared>) -> Propagation {
    if shared.drag.take().is_some() {
        shared.cursor.set(Cursor::Grab);
    }
    Propagation::Continue
}

fn route(shared: &Rc<Shared>, event: &InputEvent, scheduler: &mut AnimationScheduler) -> Propagation {
    match *event {
        InputEvent::PointerEnter => on_pointer_enter(shared, scheduler),
        InputEvent::PointerLeave => on_pointer_leave(shared, scheduler),
        InputEvent::Wheel { delta_y } => on_wheel(shared, scheduler, delta_y),
        InputEvent::PointerDown { x } => on_pointer_down(shared, x),
        InputEvent::PointerMove { x } => on_pointer_move(shared, scheduler, x),
        InputEvent::PointerUp => on_pointer_up(shared),
        InputEvent::Resize { .. } => Propagation::Continue,
    }
}

/// Register the pointer handlers; the returned subscriptions keep them alive
pub(crate) fn subscribe(shared: &Rc<Shared>, bus: &EventBus) -> Vec<Subscription> {
    [
        EventKind::PointerEnter,
        EventKind::PointerLeave,
        EventKind::Wheel,
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
    ]
    .into_iter()
    .map(|kind| {
        let weak: Weak<Shared> = Rc::downgrade(shared);
        bus.subscribe(kind, move |event, scheduler| match weak.upgrade() {
            Some(shared) => route(&shared, event, scheduler),
            None => Propagation::Continue,
        })
    })
    .collect()
}
