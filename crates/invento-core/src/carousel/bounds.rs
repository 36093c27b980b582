//! Scrollable extent of the card strip

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;

/// Source of card measurements, available once the strip has been laid out
pub trait StripLayout {
    /// Number of cards on the strip
    fn card_count(&self) -> usize;

    /// Rendered width of one card, or `None` before the first paint
    fn card_width(&self) -> Option<f64>;
}

/// Inputs of the bounds calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripGeometry {
    pub card_count: usize,
    pub card_width: f64,
    pub gap: f64,
    pub viewport_width: f64,
    pub edge_padding: f64,
}

impl StripGeometry {
    /// Measure the strip, falling back to the configured card width when the
    /// layout cannot report one yet
    pub fn measure(layout: &dyn StripLayout, config: &CarouselConfig, viewport_width: f64) -> Self {
        let card_width = layout
            .card_width()
            .filter(|w| *w > 0.0)
            .unwrap_or(config.fallback_card_width_px);

        Self {
            card_count: layout.card_count(),
            card_width,
            gap: config.gap_px,
            viewport_width,
            edge_padding: config.edge_padding_px,
        }
    }

    /// Width of all cards including one trailing gap each
    pub fn total_width(&self) -> f64 {
        (self.card_width + self.gap) * self.card_count as f64
    }

    /// Most negative permissible offset; never positive
    ///
    /// Zero when there are no cards or the content fits in the viewport.
    pub fn min_offset(&self) -> f64 {
        if self.card_count == 0 {
            return 0.0;
        }

        let total = self.total_width();
        if total <= self.viewport_width {
            return 0.0;
        }

        let bound = -(total - self.viewport_width + self.edge_padding);
        if bound < 0.0 {
            bound
        } else {
            0.0
        }
    }
}

/// Clamp an offset into `[min_offset, 0]`
#[inline]
pub fn clamp_offset(offset: f64, min_offset: f64) -> f64 {
    offset.max(min_offset).min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(count: usize, width: f64, viewport: f64) -> StripGeometry {
        StripGeometry {
            card_count: count,
            card_width: width,
            gap: 32.0,
            viewport_width: viewport,
            edge_padding: 100.0,
        }
    }

    #[test]
    fn test_ten_wide_cards_in_desktop_viewport() {
        let g = geometry(10, 400.0, 1200.0);
        assert_eq!(g.total_width(), 4320.0);
        assert_eq!(g.min_offset(), -3220.0);
    }

    #[test]
    fn test_content_that_fits_has_zero_bound() {
        let g = geometry(2, 400.0, 1400.0);
        assert_eq!(g.total_width(), 864.0);
        assert_eq!(g.min_offset(), 0.0);
    }

    #[test]
    fn test_zero_cards_has_zero_bound() {
        assert_eq!(geometry(0, 400.0, 1024.0).min_offset(), 0.0);
    }

    #[test]
    fn test_bound_is_never_positive() {
        for count in 0..30 {
            for width in [0.0, 1.0, 120.0, 400.0, 999.0] {
                for viewport in [0.0, 320.0, 1024.0, 1920.0, 5000.0] {
                    let g = geometry(count, width, viewport);
                    let bound = g.min_offset();
                    assert!(bound <= 0.0, "{:?} -> {}", g, bound);
                    if g.total_width() <= viewport {
                        assert_eq!(bound, 0.0, "{:?}", g);
                    }
                }
            }
        }
    }

    struct Unpainted;

    impl StripLayout for Unpainted {
        fn card_count(&self) -> usize {
            10
        }

        fn card_width(&self) -> Option<f64> {
            None
        }
    }

    #[test]
    fn test_unmeasured_card_uses_fallback_width() {
        let g = StripGeometry::measure(&Unpainted, &CarouselConfig::default(), 1200.0);
        assert_eq!(g.card_width, 400.0);
        assert_eq!(g.min_offset(), -3220.0);
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(-300.0, -3220.0), -300.0);
        assert_eq!(clamp_offset(-5000.0, -3220.0), -3220.0);
        assert_eq!(clamp_offset(40.0, -3220.0), 0.0);
        assert_eq!(clamp_offset(-10.0, 0.0), 0.0);
    }
}
