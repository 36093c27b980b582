//! Horizontal feature-card carousel
//!
//! Layering follows the motion module:
//! - bounds/mode: pure calculations
//! - events: subscription interface the host dispatches into
//! - autoplay/interaction: behaviors that drive the offset through the scheduler
//! - controller: lifecycle and responsive mode switching

mod autoplay;
mod bounds;
mod controller;
mod events;
mod interaction;
mod mode;
mod state;

pub use autoplay::{resume_duration, resume_target};
pub use bounds::{clamp_offset, StripGeometry, StripLayout};
pub use controller::Carousel;
pub use events::{EventBus, EventKind, InputEvent, Propagation, Subscription, WeakEventBus};
pub use interaction::wheel_passes_through;
pub use mode::ViewportMode;
pub use state::{CarouselState, Cursor, DragOrigin};
