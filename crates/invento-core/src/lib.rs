pub mod carousel;
pub mod config;
pub mod error;
pub mod motion;

pub use carousel::{
    Carousel, CarouselState, EventBus, EventKind, InputEvent, Propagation, StripGeometry,
    StripLayout, Subscription, ViewportMode,
};
pub use config::{AppConfig, CarouselConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use motion::{AnimationScheduler, Property, Repeat, TweenHandle, TweenSpec};
