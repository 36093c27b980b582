use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::CarouselConfig;
use crate::motion::{AnimationScheduler, Property};

use super::autoplay;
use super::bounds::{clamp_offset, StripGeometry, StripLayout};
use super::events::{EventBus, EventKind, InputEvent, Propagation, Subscription};
use super::interaction;
use super::mode::ViewportMode;
use super::state::{CarouselState, Cursor, Shared};

/// Auto-scrolling, draggable horizontal card strip
///
/// Mounting subscribes to viewport resizes and, in desktop mode, to pointer
/// events. `unmount` cancels every tween and timer the carousel started and
/// releases its listeners.
pub struct Carousel {
    shared: Rc<Shared>,
    resize_sub: Option<Subscription>,
}

impl Carousel {
    pub fn mount(
        bus: &EventBus,
        scheduler: &mut AnimationScheduler,
        layout: Rc<dyn StripLayout>,
        config: CarouselConfig,
        viewport_width: f64,
    ) -> Self {
        let shared = Rc::new(Shared::new(config, layout, bus.downgrade(), viewport_width));

        let weak = Rc::downgrade(&shared);
        let resize_sub = bus.subscribe(EventKind::Resize, move |event, scheduler| {
            if let (Some(shared), InputEvent::Resize { width }) = (weak.upgrade(), event) {
                on_resize(&shared, scheduler, *width);
            }
            Propagation::Continue
        });

        let mode = shared.mode.get();
        enter_mode(&shared, scheduler, mode);

        Self {
            shared,
            resize_sub: Some(resize_sub),
        }
    }

    /// Cancel all animations and remove all listeners
    pub fn unmount(mut self, scheduler: &mut AnimationScheduler) {
        teardown(&self.shared, scheduler);
        self.resize_sub.take();
        debug!("Carousel unmounted");
    }

    pub fn state(&self, scheduler: &AnimationScheduler) -> CarouselState {
        let shared = &self.shared;
        let drag_origin = shared.drag.get();
        CarouselState {
            offset_x: shared.offset.get(),
            min_offset: shared.min_offset.get(),
            is_hovering: shared.hovering.get(),
            is_dragging: drag_origin.is_some(),
            drag_origin,
            mode: shared.mode.get(),
            cursor: shared.cursor.get(),
            autoplaying: shared
                .autoplay
                .get()
                .is_some_and(|handle| scheduler.is_tween_active(handle)),
        }
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.shared.offset.get()
    }

    /// The animated offset, for observing which tweens write it
    pub fn offset_property(&self) -> &Property {
        &self.shared.offset
    }

    #[inline]
    pub fn min_offset(&self) -> f64 {
        self.shared.min_offset.get()
    }

    #[inline]
    pub fn mode(&self) -> ViewportMode {
        self.shared.mode.get()
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.shared.cursor.get()
    }

    /// Horizontal translation to render, `None` when the transform is cleared
    pub fn transform(&self) -> Option<f64> {
        match self.mode() {
            ViewportMode::Desktop => Some(self.offset()),
            ViewportMode::Mobile => None,
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if self.resize_sub.is_some() {
            warn!("Carousel dropped without unmount; its running tweens are left to the scheduler");
        }
    }
}

fn enter_mode(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler, mode: ViewportMode) {
    match mode {
        ViewportMode::Desktop => enter_desktop(shared, scheduler),
        ViewportMode::Mobile => enter_mobile(shared, scheduler),
    }
}

fn cancel_settle(shared: &Shared, scheduler: &mut AnimationScheduler) {
    if let Some(timer) = shared.settle_timer.take() {
        scheduler.cancel_timer(timer);
    }
}

fn enter_desktop(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) {
    autoplay::stop(shared, scheduler);
    cancel_settle(shared, scheduler);

    scheduler.set(&shared.offset, 0.0);
    shared.min_offset.set(0.0);
    shared.mode.set(ViewportMode::Desktop);
    shared.hovering.set(false);
    shared.drag.set(None);
    shared.cursor.set(Cursor::Grab);

    match shared.bus.upgrade() {
        Some(bus) => shared.replace_pointer_subs(interaction::subscribe(shared, &bus)),
        None => warn!("Event bus is gone; carousel stays without pointer input"),
    }

    // Card widths are only measurable once the strip has been painted.
    let weak = Rc::downgrade(shared);
    let timer = scheduler.delay(shared.config.settle_delay(), move |scheduler| {
        if let Some(shared) = weak.upgrade() {
            settle(&shared, scheduler);
        }
    });
    shared.settle_timer.set(Some(timer));

    debug!(
        "Carousel entered desktop mode at {:.0}px",
        shared.viewport_width.get()
    );
}

fn enter_mobile(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) {
    autoplay::stop(shared, scheduler);
    cancel_settle(shared, scheduler);

    scheduler.set(&shared.offset, 0.0);
    shared.min_offset.set(0.0);
    shared.mode.set(ViewportMode::Mobile);
    shared.hovering.set(false);
    shared.drag.set(None);
    shared.cursor.set(Cursor::Grab);
    shared.release_pointer_subs();

    debug!(
        "Carousel entered mobile mode at {:.0}px",
        shared.viewport_width.get()
    );
}

fn teardown(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) {
    autoplay::stop(shared, scheduler);
    cancel_settle(shared, scheduler);
    scheduler.kill_tweens_of(&shared.offset);
    shared.release_pointer_subs();
}

/// Measure the strip and clamp the offset into the new bounds
fn recompute_bounds(shared: &Shared, scheduler: &mut AnimationScheduler) -> f64 {
    let geometry = StripGeometry::measure(
        shared.layout.as_ref(),
        &shared.config,
        shared.viewport_width.get(),
    );
    let min_offset = geometry.min_offset();
    shared.min_offset.set(min_offset);

    let clamped = clamp_offset(shared.offset.get(), min_offset);
    scheduler.set(&shared.offset, clamped);

    debug!(
        "Carousel bounds: {} cards of {:.0}px, total {:.0}px in {:.0}px viewport -> {:.1}",
        geometry.card_count,
        geometry.card_width,
        geometry.total_width(),
        geometry.viewport_width,
        min_offset
    );
    min_offset
}

fn settle(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler) {
    shared.settle_timer.set(None);
    if !shared.mode.get().is_desktop() {
        return;
    }

    let min_offset = recompute_bounds(shared, scheduler);
    if min_offset < 0.0 && !shared.hovering.get() {
        autoplay::start(shared, scheduler);
    }
}

fn on_resize(shared: &Rc<Shared>, scheduler: &mut AnimationScheduler, width: f64) {
    shared.viewport_width.set(width);

    let mode = ViewportMode::from_width(width, shared.config.breakpoint_px);
    if mode != shared.mode.get() {
        enter_mode(shared, scheduler, mode);
        return;
    }
    if !mode.is_desktop() {
        return;
    }

    // Nothing may write the offset while the bounds change under it.
    autoplay::stop(shared, scheduler);
    scheduler.kill_tweens_of(&shared.offset);
    cancel_settle(shared, scheduler);

    let min_offset = recompute_bounds(shared, scheduler);
    let interacting = shared.hovering.get() || shared.drag.get().is_some();
    if min_offset < 0.0 && !interacting {
        autoplay::resume(shared, scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    struct FixedLayout {
        count: usize,
        width: Cell<Option<f64>>,
    }

    impl StripLayout for FixedLayout {
        fn card_count(&self) -> usize {
            self.count
        }

        fn card_width(&self) -> Option<f64> {
            self.width.get()
        }
    }

    struct Harness {
        t0: Instant,
        bus: EventBus,
        scheduler: AnimationScheduler,
        carousel: Option<Carousel>,
    }

    impl Harness {
        fn mount(count: usize, viewport: f64) -> Self {
            let t0 = Instant::now();
            let bus = EventBus::new();
            let mut scheduler = AnimationScheduler::starting_at(t0);
            let layout = Rc::new(FixedLayout {
                count,
                width: Cell::new(Some(400.0)),
            });
            let carousel = Carousel::mount(
                &bus,
                &mut scheduler,
                layout,
                CarouselConfig::default(),
                viewport,
            );
            Self {
                t0,
                bus,
                scheduler,
                carousel: Some(carousel),
            }
        }

        fn carousel(&self) -> &Carousel {
            self.carousel.as_ref().unwrap()
        }

        fn at(&mut self, millis: u64) {
            self.scheduler.step(self.t0 + Duration::from_millis(millis));
        }

        fn send(&mut self, event: InputEvent) -> Propagation {
            self.bus.dispatch(&event, &mut self.scheduler)
        }

        fn offset(&self) -> f64 {
            self.carousel().offset()
        }

        fn state(&self) -> CarouselState {
            self.carousel().state(&self.scheduler)
        }

        fn cursor_now(&self) -> Cursor {
            self.carousel().cursor()
        }

        fn drag(&mut self, from: f64, to: f64) {
            self.send(InputEvent::PointerDown { x: from });
            self.send(InputEvent::PointerMove { x: to });
            self.send(InputEvent::PointerUp);
        }
    }

    #[test]
    fn test_bounds_settle_then_autoplay_starts() {
        let mut h = Harness::mount(10, 1200.0);
        assert_eq!(h.state().mode, ViewportMode::Desktop);
        assert_eq!(h.carousel().min_offset(), 0.0);
        assert!(!h.state().autoplaying);

        h.at(50);
        assert_eq!(h.carousel().min_offset(), -3220.0);
        assert!(h.state().autoplaying);

        h.at(50 + 25_000);
        assert!((h.offset() + 1610.0).abs() < 1e-6);

        h.at(50 + 50_000);
        assert!((h.offset() + 3220.0).abs() < 1e-6);

        h.at(50 + 75_000);
        assert!((h.offset() + 1610.0).abs() < 1e-6);
    }

    #[test]
    fn test_content_that_fits_never_autoplays() {
        let mut h = Harness::mount(2, 1400.0);
        h.at(50);
        assert_eq!(h.carousel().min_offset(), 0.0);
        assert!(!h.state().autoplaying);
        assert!(h.scheduler.is_idle());

        h.send(InputEvent::PointerEnter);
        h.send(InputEvent::PointerLeave);
        assert!(h.scheduler.is_idle());
        assert_eq!(h.offset(), 0.0);
    }

    #[test]
    fn test_drag_tracks_pointer_and_clamps() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);

        h.drag(1000.0, 500.0);
        assert_eq!(h.offset(), -500.0);

        h.send(InputEvent::PointerDown { x: 0.0 });
        assert!(h.state().is_dragging);
        assert_eq!(h.cursor_now(), Cursor::Grabbing);
        h.send(InputEvent::PointerMove { x: 200.0 });
        assert_eq!(h.offset(), -300.0);

        h.send(InputEvent::PointerMove { x: 900.0 });
        assert_eq!(h.offset(), 0.0);
        h.send(InputEvent::PointerMove { x: -9000.0 });
        assert_eq!(h.offset(), -3220.0);

        h.send(InputEvent::PointerUp);
        assert!(!h.state().is_dragging);
        assert_eq!(h.cursor_now(), Cursor::Grab);
    }

    #[test]
    fn test_drag_end_does_not_resume_autoplay() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        assert!(!h.state().autoplaying);

        h.drag(600.0, 100.0);
        assert!(!h.state().autoplaying);
        h.at(10_000);
        assert_eq!(h.offset(), -500.0);
    }

    #[test]
    fn test_pointer_down_without_hover_is_ignored() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        assert_eq!(h.send(InputEvent::PointerDown { x: 10.0 }), Propagation::Continue);
        assert!(!h.state().is_dragging);
    }

    #[test]
    fn test_wheel_boundary_pass_through() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);

        assert_eq!(h.offset(), 0.0);
        assert_eq!(h.send(InputEvent::Wheel { delta_y: -100.0 }), Propagation::Continue);

        h.drag(5000.0, 0.0);
        assert_eq!(h.offset(), -3220.0);
        assert_eq!(h.send(InputEvent::Wheel { delta_y: 100.0 }), Propagation::Continue);

        assert_eq!(h.send(InputEvent::Wheel { delta_y: -100.0 }), Propagation::Stop);
    }

    #[test]
    fn test_wheel_without_hover_is_not_intercepted() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        assert_eq!(h.send(InputEvent::Wheel { delta_y: 100.0 }), Propagation::Continue);
    }

    #[test]
    fn test_wheel_tweens_to_scaled_clamped_offset() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.drag(500.0, 0.0);

        assert_eq!(h.send(InputEvent::Wheel { delta_y: 100.0 }), Propagation::Stop);
        assert_eq!(h.scheduler.active_tweens_on(h.carousel().offset_property()), 1);
        h.at(50 + 150);
        assert!((h.offset() + 620.0).abs() < 1e-9);

        h.send(InputEvent::Wheel { delta_y: -10_000.0 });
        h.at(50 + 300);
        assert_eq!(h.offset(), 0.0);
    }

    #[test]
    fn test_hover_cancels_autoplay() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.at(10_050);
        let paused_at = h.offset();
        assert!(paused_at < 0.0);

        h.send(InputEvent::PointerEnter);
        assert!(!h.state().autoplaying);
        h.at(20_050);
        assert_eq!(h.offset(), paused_at);
    }

    #[test]
    fn test_hover_leave_resumes_at_constant_speed() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.drag(500.0, 0.0);
        assert_eq!(h.offset(), -500.0);

        h.send(InputEvent::PointerLeave);
        assert!(h.state().autoplaying);
        assert!(!h.state().is_hovering);

        // 2720px left at 3220px per 50s
        let hop_ms = (2720.0 / 3220.0 * 50_000.0) as u64;
        h.at(50 + hop_ms + 1);
        assert_eq!(h.offset(), -3220.0);
        assert!(h.state().autoplaying);

        h.at(50 + hop_ms + 1 + 25_000);
        assert!((h.offset() + 1610.0).abs() < 1.0);
    }

    #[test]
    fn test_hover_leave_past_midpoint_heads_home() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.drag(3000.0, 0.0);

        h.send(InputEvent::PointerLeave);
        h.at(50 + 10_000);
        assert!(h.offset() > -3000.0);
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.send(InputEvent::PointerDown { x: 100.0 });
        h.send(InputEvent::PointerLeave);

        let state = h.state();
        assert!(!state.is_dragging);
        assert_eq!(state.cursor, Cursor::Grab);
    }

    #[test]
    fn test_switch_to_mobile_resets_everything() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.at(5_050);
        assert!(h.offset() < 0.0);

        h.send(InputEvent::Resize { width: 800.0 });
        let state = h.state();
        assert_eq!(state.mode, ViewportMode::Mobile);
        assert_eq!(state.offset_x, 0.0);
        assert!(!state.autoplaying);
        assert_eq!(h.carousel().transform(), None);
        assert!(h.scheduler.is_idle());
        assert_eq!(h.bus.listener_count(EventKind::Wheel), 0);
        assert_eq!(h.bus.listener_count(EventKind::Resize), 1);

        h.at(60_000);
        assert_eq!(h.offset(), 0.0);
    }

    #[test]
    fn test_switch_to_mobile_mid_drag_resets() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.send(InputEvent::PointerDown { x: 800.0 });
        h.send(InputEvent::PointerMove { x: 100.0 });

        h.send(InputEvent::Resize { width: 600.0 });
        let state = h.state();
        assert_eq!(state.offset_x, 0.0);
        assert!(!state.is_dragging);
        assert!(!state.is_hovering);
    }

    #[test]
    fn test_mobile_mount_is_inert_until_breakpoint_is_crossed() {
        let mut h = Harness::mount(10, 700.0);
        assert_eq!(h.state().mode, ViewportMode::Mobile);
        assert_eq!(h.bus.listener_count(EventKind::PointerEnter), 0);
        assert!(h.scheduler.is_idle());

        h.send(InputEvent::Resize { width: 900.0 });
        assert_eq!(h.state().mode, ViewportMode::Mobile);

        h.send(InputEvent::Resize { width: 1300.0 });
        assert_eq!(h.state().mode, ViewportMode::Desktop);
        assert_eq!(h.carousel().transform(), Some(0.0));
        assert_eq!(h.bus.listener_count(EventKind::PointerEnter), 1);

        h.at(50);
        assert_eq!(h.carousel().min_offset(), -(4320.0 - 1300.0 + 100.0));
        assert!(h.state().autoplaying);
    }

    #[test]
    fn test_desktop_resize_clamps_into_new_bounds() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.drag(3000.0, 0.0);
        assert_eq!(h.offset(), -3000.0);

        h.send(InputEvent::Resize { width: 3000.0 });
        assert_eq!(h.carousel().min_offset(), -1420.0);
        assert_eq!(h.offset(), -1420.0);
        // Still hovering: stays suspended
        assert!(!h.state().autoplaying);
    }

    #[test]
    fn test_desktop_resize_cancels_wheel_tween_before_clamping() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.drag(2500.0, 0.0);
        h.send(InputEvent::Wheel { delta_y: 500.0 });

        h.send(InputEvent::Resize { width: 3000.0 });
        assert_eq!(h.scheduler.active_tweens_on(h.carousel().offset_property()), 0);
        h.at(1_000);
        assert!(h.offset() >= -1420.0);
    }

    #[test]
    fn test_desktop_resize_restarts_autoplay_when_idle() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.at(1_050);
        h.send(InputEvent::Resize { width: 1600.0 });
        assert!(h.state().autoplaying);
        assert_eq!(h.scheduler.active_tweens_on(h.carousel().offset_property()), 1);
    }

    #[test]
    fn test_resize_to_wide_viewport_stops_scrolling() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.at(3_050);
        h.send(InputEvent::Resize { width: 5000.0 });
        assert_eq!(h.carousel().min_offset(), 0.0);
        assert_eq!(h.offset(), 0.0);
        assert!(!h.state().autoplaying);
    }

    #[test]
    fn test_unmount_releases_listeners_and_tweens() {
        let mut h = Harness::mount(10, 1200.0);
        h.at(50);
        h.send(InputEvent::PointerEnter);
        h.send(InputEvent::PointerLeave);

        let carousel = h.carousel.take().unwrap();
        carousel.unmount(&mut h.scheduler);

        for kind in [
            EventKind::Resize,
            EventKind::PointerEnter,
            EventKind::PointerLeave,
            EventKind::Wheel,
            EventKind::PointerDown,
            EventKind::PointerMove,
            EventKind::PointerUp,
        ] {
            assert_eq!(h.bus.listener_count(kind), 0, "{:?}", kind);
        }
        assert!(h.scheduler.is_idle());
    }

    #[test]
    fn test_unmount_before_settle_cancels_timer() {
        let mut h = Harness::mount(10, 1200.0);
        let carousel = h.carousel.take().unwrap();
        carousel.unmount(&mut h.scheduler);
        assert!(h.scheduler.is_idle());
        h.at(100);
    }

    /// Small deterministic generator for event sequences
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }

        fn range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (self.next() % 10_000) as f64 / 10_000.0 * (hi - lo)
        }
    }

    #[test]
    fn test_offset_invariant_and_single_writer_under_random_input() {
        for seed in 1..=20u64 {
            let mut rng = Lcg(seed);
            let mut h = Harness::mount(10, 1200.0);
            let mut clock = 0u64;

            for _ in 0..400 {
                let event = match rng.next() % 8 {
                    0 => InputEvent::PointerEnter,
                    1 => InputEvent::PointerLeave,
                    2 => InputEvent::Wheel {
                        delta_y: rng.range(-600.0, 600.0),
                    },
                    3 => InputEvent::PointerDown {
                        x: rng.range(0.0, 2000.0),
                    },
                    4 => InputEvent::PointerMove {
                        x: rng.range(-3000.0, 5000.0),
                    },
                    5 => InputEvent::PointerUp,
                    6 => InputEvent::Resize {
                        width: rng.range(600.0, 4000.0),
                    },
                    _ => InputEvent::PointerMove {
                        x: rng.range(0.0, 2000.0),
                    },
                };
                h.send(event);
                clock += rng.next() % 400;
                h.at(clock);

                let state = h.state();
                assert!(
                    state.offset_x <= 0.0 && state.offset_x >= state.min_offset - 1e-9,
                    "seed {} after {:?}: {:?}",
                    seed,
                    event,
                    state
                );
                assert!(h.scheduler.active_tweens_on(h.carousel().offset_property()) <= 1);
                if state.mode == ViewportMode::Mobile {
                    assert_eq!(state.offset_x, 0.0);
                    assert!(!state.autoplaying);
                }
            }

            let carousel = h.carousel.take().unwrap();
            carousel.unmount(&mut h.scheduler);
        }
    }
}
