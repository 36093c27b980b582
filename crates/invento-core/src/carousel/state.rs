use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CarouselConfig;
use crate::motion::{Property, TimerHandle, TweenHandle};

use super::bounds::StripLayout;
use super::events::{Subscription, WeakEventBus};
use super::mode::ViewportMode;

/// Pointer position and offset captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub pointer_x: f64,
    pub offset_at_start: f64,
}

/// Cursor affordance over the carousel hit area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

/// Snapshot of a carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    /// Current translation, always within `[min_offset, 0]`
    pub offset_x: f64,
    /// Most negative permissible offset
    pub min_offset: f64,
    pub is_hovering: bool,
    pub is_dragging: bool,
    pub drag_origin: Option<DragOrigin>,
    pub mode: ViewportMode,
    pub cursor: Cursor,
    /// Autoplay loop, or the hop back into it, is running
    pub autoplaying: bool,
}

/// State shared between a carousel and the handlers it registered
pub(crate) struct Shared {
    pub config: CarouselConfig,
    pub layout: Rc<dyn StripLayout>,
    pub bus: WeakEventBus,
    pub offset: Property,
    pub min_offset: Cell<f64>,
    pub viewport_width: Cell<f64>,
    pub mode: Cell<ViewportMode>,
    pub hovering: Cell<bool>,
    pub drag: Cell<Option<DragOrigin>>,
    pub cursor: Cell<Cursor>,
    pub autoplay: Cell<Option<TweenHandle>>,
    pub settle_timer: Cell<Option<TimerHandle>>,
    pub pointer_subs: RefCell<Vec<Subscription>>,
}

impl Shared {
    pub fn new(
        config: CarouselConfig,
        layout: Rc<dyn StripLayout>,
        bus: WeakEventBus,
        viewport_width: f64,
    ) -> Self {
        let mode = ViewportMode::from_width(viewport_width, config.breakpoint_px);
        Self {
            config,
            layout,
            bus,
            offset: Property::new(0.0),
            min_offset: Cell::new(0.0),
            viewport_width: Cell::new(viewport_width),
            mode: Cell::new(mode),
            hovering: Cell::new(false),
            drag: Cell::new(None),
            cursor: Cell::new(Cursor::Grab),
            autoplay: Cell::new(None),
            settle_timer: Cell::new(None),
            pointer_subs: RefCell::new(Vec::new()),
        }
    }

    pub fn replace_pointer_subs(&self, subs: Vec<Subscription>) {
        let old = std::mem::replace(&mut *self.pointer_subs.borrow_mut(), subs);
        drop(old);
    }

    pub fn release_pointer_subs(&self) {
        self.replace_pointer_subs(Vec::new());
    }
}
