//! Vertical bounds of a parent element in document space.

use log::trace;

use crate::host::{ElementKey, StickyHost};

/// Cached document-absolute extent of a parent element.
///
/// Both edges are measured from the top of the scrollable document, so they do
/// not move while the page scrolls. They go stale when layout changes and must
/// be re-measured after a resize.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Measure `element` through `host`.
    ///
    /// The bounding rectangle is viewport-relative, so the current scroll
    /// offset is added to bring `top` into document space.
    pub fn measure<H: StickyHost + ?Sized>(host: &H, element: ElementKey) -> Self {
        let top = host.bounding_rect_top(element) + host.scroll_offset();
        let height = host.client_height(element).max(0.0);
        let bounds = Self {
            top,
            bottom: top + height,
        };
        trace!(
            "sticky: measured element {} top={} bottom={}",
            element.0, bounds.top, bounds.bottom
        );
        bounds
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether `scroll_position` lies inside the window where the child follows
    /// the viewport. Both edges are inclusive.
    pub fn contains_sticky(&self, scroll_position: f64, offset: f64) -> bool {
        self.top <= scroll_position + offset && self.bottom >= scroll_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_window_edges_are_inclusive() {
        let bounds = Bounds {
            top: 500.0,
            bottom: 900.0,
        };
        assert!(bounds.contains_sticky(500.0, 0.0));
        assert!(bounds.contains_sticky(900.0, 0.0));
        assert!(!bounds.contains_sticky(499.0, 0.0));
        assert!(!bounds.contains_sticky(900.5, 0.0));
    }

    #[test]
    fn offset_opens_window_early() {
        let bounds = Bounds {
            top: 500.0,
            bottom: 900.0,
        };
        assert!(bounds.contains_sticky(480.0, 20.0));
        assert!(!bounds.contains_sticky(479.0, 20.0));
        assert!((bounds.height() - 400.0).abs() < f64::EPSILON);
    }
}
