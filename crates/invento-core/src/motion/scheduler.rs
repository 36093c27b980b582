//! Animation scheduler
//!
//! Owns every running tween and deferred timer. Callers get explicit handles
//! back and cancel through them; nothing is looked up globally. The host calls
//! `step()` once per frame with the frame's timestamp.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::EasingType;
use super::timing::{lerp, progress, yoyo_phase};

/// Completion or timer callback. Receives the scheduler so it can chain work.
pub type Callback = Box<dyn FnOnce(&mut AnimationScheduler)>;

/// A numeric value animated by the scheduler
///
/// Clones share the same cell. Only the scheduler writes it.
#[derive(Clone, Default)]
pub struct Property {
    cell: Rc<Cell<f64>>,
}

impl Property {
    pub fn new(value: f64) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    #[inline]
    fn write(&self, value: f64) {
        self.cell.set(value);
    }

    #[inline]
    fn is(&self, other: &Property) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.get()).finish()
    }
}

/// How a tween behaves once it reaches its end value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Stop at the end value and fire the completion callback
    Once,
    /// Run back and forth between start and end forever
    Yoyo,
}

/// Description of a tween to start
pub struct TweenSpec {
    pub to: f64,
    pub duration: Duration,
    pub easing: EasingType,
    pub repeat: Repeat,
    on_complete: Option<Callback>,
}

impl TweenSpec {
    /// Linear, non-repeating tween to `to`
    pub fn new(to: f64, duration: Duration) -> Self {
        Self {
            to,
            duration,
            easing: EasingType::Linear,
            repeat: Repeat::Once,
            on_complete: None,
        }
    }

    pub fn easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.repeat = Repeat::Yoyo;
        self
    }

    /// Run `callback` when the tween reaches its end value
    ///
    /// Never runs for a tween that was killed or overwritten, nor for a yoyo tween.
    pub fn on_complete(mut self, callback: impl FnOnce(&mut AnimationScheduler) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for TweenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenSpec")
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("repeat", &self.repeat)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Handle to a running tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

/// Handle to a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Tween {
    target: Property,
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    easing: EasingType,
    repeat: Repeat,
    on_complete: Option<Callback>,
}

impl Tween {
    /// Value at `now` and whether the tween is finished
    fn sample(&self, now: Instant) -> (f64, bool) {
        let elapsed = now.saturating_duration_since(self.start);
        match self.repeat {
            Repeat::Once => {
                let t = progress(elapsed, self.duration);
                if t >= 1.0 {
                    (self.to, true)
                } else {
                    (lerp(self.from, self.to, self.easing.apply(t)), false)
                }
            }
            Repeat::Yoyo => {
                let (phase, reversed) = yoyo_phase(elapsed, self.duration);
                let t = self.easing.apply(phase);
                if reversed {
                    (lerp(self.to, self.from, t), false)
                } else {
                    (lerp(self.from, self.to, t), false)
                }
            }
        }
    }
}

struct Timer {
    due: Instant,
    callback: Callback,
}

/// Registry of tweens and timers, stepped by the host's frame loop
///
/// At most one tween owns a property at any time: starting a tween or
/// `set`ting a property first kills whatever tween was writing it.
pub struct AnimationScheduler {
    now: Instant,
    next_id: u64,
    tweens: BTreeMap<u64, Tween>,
    timers: BTreeMap<u64, Timer>,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("tweens", &self.tweens.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a scheduler whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            now,
            next_id: 1,
            tweens: BTreeMap::new(),
            timers: BTreeMap::new(),
        }
    }

    /// Timestamp of the last step; new tweens and timers start from it
    #[inline]
    pub fn now(&self) -> Instant {
        self.now
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a tween on `target` from its current value
    pub fn to(&mut self, target: &Property, spec: TweenSpec) -> TweenHandle {
        let killed = self.kill_tweens_of(target);
        let id = self.allocate_id();
        trace!(
            "Tween {} started: {:.1} -> {:.1} over {:?} ({:?}, overwrote {})",
            id,
            target.get(),
            spec.to,
            spec.duration,
            spec.repeat,
            killed
        );
        self.tweens.insert(
            id,
            Tween {
                target: target.clone(),
                from: target.get(),
                to: spec.to,
                start: self.now,
                duration: spec.duration,
                easing: spec.easing,
                repeat: spec.repeat,
                on_complete: spec.on_complete,
            },
        );
        TweenHandle(id)
    }

    /// Write `value` immediately, killing any tween on `target`
    pub fn set(&mut self, target: &Property, value: f64) {
        self.kill_tweens_of(target);
        target.write(value);
    }

    /// Kill a tween. Returns false if it already finished or was killed.
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        self.tweens.remove(&handle.0).is_some()
    }

    /// Kill every tween writing `target`, returning how many were running
    pub fn kill_tweens_of(&mut self, target: &Property) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, tween| !tween.target.is(target));
        before - self.tweens.len()
    }

    pub fn is_tween_active(&self, handle: TweenHandle) -> bool {
        self.tweens.contains_key(&handle.0)
    }

    /// Number of tweens currently writing `target`
    pub fn active_tweens_on(&self, target: &Property) -> usize {
        self.tweens.values().filter(|t| t.target.is(target)).count()
    }

    /// Run `callback` once `delay` has elapsed on the scheduler clock
    pub fn delay(
        &mut self,
        delay: Duration,
        callback: impl FnOnce(&mut AnimationScheduler) + 'static,
    ) -> TimerHandle {
        let id = self.allocate_id();
        self.timers.insert(
            id,
            Timer {
                due: self.now + delay,
                callback: Box::new(callback),
            },
        );
        TimerHandle(id)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle.0).is_some()
    }

    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    /// True when nothing is animating or waiting
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty() && self.timers.is_empty()
    }

    /// Advance the clock to `now` and write every tween's value
    ///
    /// Finished tweens are removed before their callbacks run, and a callback
    /// that kills another finished tween suppresses that tween's callback.
    /// Due timers fire afterwards, earliest first. The clock never goes back.
    pub fn step(&mut self, now: Instant) {
        self.now = self.now.max(now);

        let mut finished = Vec::new();
        for (id, tween) in &self.tweens {
            let (value, done) = tween.sample(self.now);
            tween.target.write(value);
            if done {
                finished.push(*id);
            }
        }

        for id in finished {
            if let Some(tween) = self.tweens.remove(&id) {
                trace!("Tween {} completed at {:.1}", id, tween.to);
                if let Some(callback) = tween.on_complete {
                    callback(self);
                }
            }
        }

        let mut due: Vec<(Instant, u64)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= self.now)
            .map(|(id, timer)| (timer.due, *id))
            .collect();
        due.sort();

        for (_, id) in due {
            if let Some(timer) = self.timers.remove(&id) {
                (timer.callback)(self);
            }
        }
    }
}
