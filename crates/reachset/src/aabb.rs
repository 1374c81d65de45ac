//! Axis-aligned bounding boxes and grid discretisation helpers.

use crate::error::ReachError;

/// Rectangle `(xmin, ymin, xmax, ymax)`, `xmin <= xmax`, `ymin <= ymax`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Aabb {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    #[inline]
    pub fn diagonal_squared(&self) -> f64 {
        let dx = self.xmax - self.xmin;
        let dy = self.ymax - self.ymin;
        dx * dx + dy * dy
    }

    /// Strict (open-interval) overlap test.
    #[inline]
    pub fn overlaps_strict(&self, other: &Aabb) -> bool {
        self.xmin < other.xmax && other.xmin < self.xmax && self.ymin < other.ymax && other.ymin < self.ymax
    }

    /// Split into two halves along the longer axis; ties broken toward x.
    pub fn split_longer_axis(&self) -> (Aabb, Aabb) {
        let dx = self.xmax - self.xmin;
        let dy = self.ymax - self.ymin;
        if dx >= dy {
            let mid = 0.5 * (self.xmin + self.xmax);
            (
                Aabb::new(self.xmin, self.ymin, mid, self.ymax),
                Aabb::new(mid, self.ymin, self.xmax, self.ymax),
            )
        } else {
            let mid = 0.5 * (self.ymin + self.ymax);
            (
                Aabb::new(self.xmin, self.ymin, self.xmax, mid),
                Aabb::new(self.xmin, mid, self.xmax, self.ymax),
            )
        }
    }
}

/// Componentwise minimum position over a set of rectangles.
pub fn compute_minimum_positions_of_rectangles(rects: &[Aabb]) -> Option<(f64, f64)> {
    if rects.is_empty() {
        return None;
    }
    let xmin = rects.iter().map(|r| r.xmin).fold(f64::INFINITY, f64::min);
    let ymin = rects.iter().map(|r| r.ymin).fold(f64::INFINITY, f64::min);
    Some((xmin, ymin))
}

/// An integer-grid rectangle, inclusive of `(xmax, ymax)` as a grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct IntRect {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

/// Translate by `-p_min` then divide by `delta`, rounding outward (floor min,
/// ceil max) so the discretised cover contains the continuous union.
pub fn discretize_rectangles(rects: &[Aabb], p_min: (f64, f64), delta: f64) -> Result<Vec<IntRect>, ReachError> {
    if !(delta > 0.0) {
        return Err(ReachError::config("size_grid", delta, "must be > 0"));
    }
    Ok(rects
        .iter()
        .map(|r| IntRect {
            xmin: (((r.xmin - p_min.0) / delta).floor()) as i64,
            ymin: (((r.ymin - p_min.1) / delta).floor()) as i64,
            xmax: (((r.xmax - p_min.0) / delta).ceil()) as i64,
            ymax: (((r.ymax - p_min.1) / delta).ceil()) as i64,
        })
        .collect())
}

/// Inverse of [`discretize_rectangles`]: multiply by `delta`, translate by `+p_min`.
pub fn undiscretize_rectangles(rects: &[IntRect], p_min: (f64, f64), delta: f64) -> Vec<Aabb> {
    rects
        .iter()
        .map(|r| {
            Aabb::new(
                r.xmin as f64 * delta + p_min.0,
                r.ymin as f64 * delta + p_min.1,
                r.xmax as f64 * delta + p_min.0,
                r.ymax as f64 * delta + p_min.1,
            )
        })
        .collect()
}
