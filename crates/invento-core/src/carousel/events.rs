//! Explicit subscription interface for viewport and pointer events
//!
//! A component subscribes with `EventBus::subscribe` and keeps the returned
//! `Subscription`; dropping it removes the listener. The host feeds events in
//! through `dispatch` and learns whether any listener intercepted them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::motion::AnimationScheduler;

/// Kind of event a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerEnter,
    PointerLeave,
    Wheel,
    PointerDown,
    PointerMove,
    PointerUp,
}

/// Event delivered to listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Viewport width changed
    Resize { width: f64 },
    /// Pointer entered the carousel hit area
    PointerEnter,
    /// Pointer left the carousel hit area
    PointerLeave,
    /// Wheel gesture; positive `delta_y` scrolls down
    Wheel { delta_y: f64 },
    /// Primary button pressed at horizontal position `x`
    PointerDown { x: f64 },
    /// Pointer moved to horizontal position `x`
    PointerMove { x: f64 },
    /// Primary button released
    PointerUp,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::PointerEnter => EventKind::PointerEnter,
            InputEvent::PointerLeave => EventKind::PointerLeave,
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerUp => EventKind::PointerUp,
        }
    }
}

/// Whether the host's default handling should still run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Not intercepted; e.g. the page scrolls natively
    Continue,
    /// Intercepted by a listener
    Stop,
}

impl Propagation {
    #[inline]
    pub fn is_stopped(self) -> bool {
        self == Propagation::Stop
    }
}

type Handler = Rc<RefCell<dyn FnMut(&InputEvent, &mut AnimationScheduler) -> Propagation>>;

struct Listener {
    id: u64,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    fn take(&mut self, id: u64) -> Option<Listener> {
        let index = self.listeners.iter().position(|l| l.id == id)?;
        Some(self.listeners.remove(index))
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }
}

/// Listener registry shared by the host and its components
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&InputEvent, &mut AnimationScheduler) -> Propagation + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener of its kind, in subscription order
    ///
    /// Returns `Stop` if any listener intercepted it. Listeners removed by an
    /// earlier listener during the same dispatch are skipped.
    pub fn dispatch(&self, event: &InputEvent, scheduler: &mut AnimationScheduler) -> Propagation {
        let kind = event.kind();
        let handlers: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.id, l.handler.clone()))
            .collect();

        let mut outcome = Propagation::Continue;
        for (id, handler) in handlers {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let Ok(mut callback) = handler.try_borrow_mut() else {
                warn!("Skipping re-entrant dispatch of {:?} to listener {}", kind, id);
                continue;
            };
            if (&mut *callback)(event, scheduler).is_stopped() {
                outcome = Propagation::Stop;
            }
        }
        outcome
    }

    /// Number of live listeners for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub fn downgrade(&self) -> WeakEventBus {
        WeakEventBus {
            registry: Rc::downgrade(&self.registry),
        }
    }
}

/// Non-owning reference to an `EventBus`
#[derive(Clone, Default)]
pub struct WeakEventBus {
    registry: Weak<RefCell<Registry>>,
}

impl WeakEventBus {
    pub fn upgrade(&self) -> Option<EventBus> {
        self.registry.upgrade().map(|registry| EventBus { registry })
    }
}

/// Live listener registration; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the listener now
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // The listener is dropped after the borrow ends: its handler may
            // own other subscriptions on this registry.
            let removed = registry.borrow_mut().take(self.id);
            drop(removed);
        }
    }
}
