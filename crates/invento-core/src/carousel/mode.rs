/// Whether the carousel mechanism is active for the current viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Below the breakpoint: cards flow naturally, no transform
    Mobile,
    /// At or above the breakpoint: translated strip with autoplay
    Desktop,
}

impl ViewportMode {
    pub fn from_width(viewport_width: f64, breakpoint: f64) -> Self {
        if viewport_width >= breakpoint {
            ViewportMode::Desktop
        } else {
            ViewportMode::Mobile
        }
    }

    #[inline]
    pub fn is_desktop(self) -> bool {
        self == ViewportMode::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert_eq!(ViewportMode::from_width(1023.0, 1024.0), ViewportMode::Mobile);
        assert_eq!(ViewportMode::from_width(1024.0, 1024.0), ViewportMode::Desktop);
        assert!(ViewportMode::from_width(1920.0, 1024.0).is_desktop());
    }
}
