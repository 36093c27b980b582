//! Smooth vertical page scrolling
//!
//! # Architecture
//!
//! ## Atomic layer
//! - easing and timing live in `invento_core::motion` and are shared with the carousel
//! - `config` - Duration helpers over `ScrollConfig`
//!
//! ## Molecular layer
//! - `animation` - Page scroll controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use invento_tui::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone());
//!
//! // Queue a scroll
//! animator.scroll_by(10);
//!
//! // Each frame, advance and read the position
//! let scroll = animator.update(Instant::now(), max_scroll);
//! ```

pub mod config;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
