//! Page scroll animation controller
//!
//! Batches scroll deltas and eases the visible row towards the target.
//! Every time-dependent call takes the frame's `Instant`.

use std::time::{Duration, Instant};

use invento_core::motion::timing::{lerp, progress};

use super::config::{EasingType, ScrollConfig, ScrollConfigExt};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

impl ActiveAnimation {
    fn sample(&self, now: Instant) -> (u16, bool) {
        let t = progress(now.saturating_duration_since(self.start), self.duration);
        if t >= 1.0 {
            return (self.to, true);
        }
        let value = lerp(self.from as f64, self.to as f64, self.easing.apply(t));
        (value.round().clamp(0.0, u16::MAX as f64) as u16, false)
    }
}

/// Scroll animation controller for the showcase page
///
/// Queue movement with `scroll_by`/`scroll_to`, then call `update()` each
/// frame to get the current interpolated row.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Check if there's pending work (animation or pending delta)
    /// Use this to determine if we need high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Animate to an absolute row starting at `now`
    ///
    /// Jumps immediately when smooth scrolling is disabled.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.start_animation(target, now);
    }

    /// Queue a relative scroll (positive = down); applied on the next update
    ///
    /// Multiple scroll events within the same frame are batched together.
    pub fn scroll_by(&mut self, delta: i32) {
        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_by(self.config.scroll_lines as i32);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_by(-(self.config.scroll_lines as i32));
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(half_page);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(-half_page);
    }

    fn start_animation(&mut self, target: u16, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance to `now` and return the current row
    pub fn update(&mut self, now: Instant, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target_scroll() as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if !self.config.is_smooth() {
                self.current_scroll = target;
                self.animation = None;
            } else if target != self.current_scroll {
                self.start_animation(target, now);
            } else {
                self.animation = None;
            }
        }

        if let Some(anim) = &self.animation {
            let (value, done) = anim.sample(now);
            self.current_scroll = value;
            if done {
                self.animation = None;
            }
        }

        // The page may have shrunk under the animation
        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}
