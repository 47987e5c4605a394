use serde::Serialize;

use crate::chart::Domain;

/// Linear mapping from a value domain onto a pixel range.
///
/// For price panels the range runs bottom → top, so larger prices map to
/// smaller y values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Vertical scale for a panel occupying `[top, top + height]`.
    pub fn vertical(domain: Domain, top: f64, height: f64) -> Self {
        LinearScale::new(domain, (top + height, top))
    }

    /// Works on halved values so domains near the float limits do not overflow.
    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.max / 2.0 - self.domain.min / 2.0;
        let t = (value / 2.0 - self.domain.min / 2.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// A scale is usable when both ends are finite and neither side collapses.
    pub fn is_monotonic(&self) -> bool {
        let (r0, r1) = self.range;
        self.domain.min.is_finite()
            && self.domain.max.is_finite()
            && self.domain.min < self.domain.max
            && r0.is_finite()
            && r1.is_finite()
            && r0 != r1
    }
}

/// Equal-width horizontal slots, one per series point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub left: f64,
    pub width: f64,
    pub count: usize,
}

impl Band {
    pub fn new(left: f64, width: f64, count: usize) -> Self {
        Band { left, width, count }
    }

    pub fn slot_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.width / self.count as f64
    }

    /// Left edge and width of slot `index`.
    pub fn slot(&self, index: usize) -> (f64, f64) {
        let slot_width = self.slot_width();
        (self.left + index as f64 * slot_width, slot_width)
    }

    pub fn center(&self, index: usize) -> f64 {
        let (x, width) = self.slot(index);
        x + width / 2.0
    }
}
