use anyhow::Result;
use serde::Serialize;

use invento_core::{StripGeometry, ViewportMode};

#[derive(Debug, Serialize)]
pub struct BoundsReport {
    #[serde(flatten)]
    pub geometry: StripGeometry,
    pub total_width: f64,
    pub min_offset: f64,
    /// Whether the viewport is wide enough for the carousel at all
    pub carousel_active: bool,
}

impl BoundsReport {
    pub fn new(geometry: StripGeometry, breakpoint: f64) -> Self {
        Self {
            total_width: geometry.total_width(),
            min_offset: geometry.min_offset(),
            carousel_active: ViewportMode::from_width(geometry.viewport_width, breakpoint)
                .is_desktop(),
            geometry,
        }
    }
}

pub fn run(geometry: StripGeometry, breakpoint: f64, json: bool) -> Result<()> {
    let report = BoundsReport::new(geometry, breakpoint);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let g = &report.geometry;
    println!(
        "{} cards of {}px with {}px gaps in a {}px viewport (padding {}px)",
        g.card_count, g.card_width, g.gap, g.viewport_width, g.edge_padding
    );
    println!("  total width: {}px", report.total_width);
    println!("  min offset:  {}px", report.min_offset);
    if !report.carousel_active {
        println!("  below the {}px breakpoint: cards are stacked, no carousel", breakpoint);
    } else if report.min_offset == 0.0 {
        println!("  content fits: no autoplay");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(count: usize, viewport: f64) -> StripGeometry {
        StripGeometry {
            card_count: count,
            card_width: 400.0,
            gap: 32.0,
            viewport_width: viewport,
            edge_padding: 100.0,
        }
    }

    #[test]
    fn test_report_for_ten_cards() {
        let report = BoundsReport::new(geometry(10, 1200.0), 1024.0);
        assert_eq!(report.total_width, 4320.0);
        assert_eq!(report.min_offset, -3220.0);
        assert!(report.carousel_active);
    }

    #[test]
    fn test_report_json_is_flat() {
        let report = BoundsReport::new(geometry(2, 800.0), 1024.0);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["card_count"], 2);
        assert_eq!(value["min_offset"], 0.0);
        assert_eq!(value["carousel_active"], false);
    }
}
