//! Strict, angle-ordered H-representation convex polygon (`Poly2`).
//!
//! Invariants:
//! - Unit normals (||n|| = 1).
//! - Angle-sorted by atan2(n.y, n.x).
//! - Parallel halfspaces coalesced (keep the most restrictive `c`).

use nalgebra::Vector2;

use crate::error::ReachError;

use super::types::Hs2;
use super::util::{angle_of, canonicalize_unit};

#[derive(Clone, Debug, Default)]
pub struct Poly2 {
    pub hs: Vec<Hs2>,
}

impl Poly2 {
    /// Build a polygon from an axis-aligned rectangle.
    pub fn from_rect(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        let mut p = Poly2::default();
        p.insert_halfspace(Hs2::new(Vector2::new(1.0, 0.0), xmax));
        p.insert_halfspace(Hs2::new(Vector2::new(-1.0, 0.0), -xmin));
        p.insert_halfspace(Hs2::new(Vector2::new(0.0, 1.0), ymax));
        p.insert_halfspace(Hs2::new(Vector2::new(0.0, -1.0), -ymin));
        p
    }

    /// Insert a half-space, preserving angle order and coalescing parallels.
    pub fn insert_halfspace(&mut self, h: Hs2) {
        if let Some((n, c)) = canonicalize_unit(h.n, h.c) {
            let key = angle_of(n);
            let mut lo = 0usize;
            let mut hi = self.hs.len();
            while lo < hi {
                let mid = (lo + hi) / 2;
                if angle_of(self.hs[mid].n) <= key {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }
            if lo > 0 && (self.hs[lo - 1].n - n).norm() < 1e-9 {
                if c < self.hs[lo - 1].c {
                    self.hs[lo - 1].c = c;
                }
                return;
            }
            if lo < self.hs.len() && (self.hs[lo].n - n).norm() < 1e-9 {
                if c < self.hs[lo].c {
                    self.hs[lo].c = c;
                }
                return;
            }
            self.hs.insert(lo, Hs2::new(n, c));
        }
    }

    /// Add `ax + by <= c`, failing if the resulting polygon is infeasible.
    pub fn intersect_halfspace(&mut self, a: f64, b: f64, c: f64) -> Result<(), ReachError> {
        let mut next = self.clone();
        next.insert_halfspace(Hs2::new(Vector2::new(a, b), c));
        if next.is_empty_eps(1e-9) {
            return Err(ReachError::infeasible("intersect_halfspace"));
        }
        *self = next;
        Ok(())
    }

    /// Intersect with another strict poly (merge two angle-sorted streams).
    pub fn intersect(&self, other: &Poly2) -> Poly2 {
        let mut i = 0usize;
        let mut j = 0usize;
        let mut out: Vec<Hs2> = Vec::with_capacity(self.hs.len() + other.hs.len());
        while i < self.hs.len() && j < other.hs.len() {
            let ai = angle_of(self.hs[i].n);
            let bj = angle_of(other.hs[j].n);
            if (ai - bj).abs() < 1e-12 {
                let c = self.hs[i].c.min(other.hs[j].c);
                push_or_coalesce(&mut out, self.hs[i].n, c);
                i += 1;
                j += 1;
            } else if ai < bj {
                push_or_coalesce(&mut out, self.hs[i].n, self.hs[i].c);
                i += 1;
            } else {
                push_or_coalesce(&mut out, other.hs[j].n, other.hs[j].c);
                j += 1;
            }
        }
        while i < self.hs.len() {
            push_or_coalesce(&mut out, self.hs[i].n, self.hs[i].c);
            i += 1;
        }
        while j < other.hs.len() {
            push_or_coalesce(&mut out, other.hs[j].n, other.hs[j].c);
            j += 1;
        }
        Poly2 { hs: out }
    }

    /// Translate by `(dx, dy)`: substitutes `(x,y) -> (x-dx, y-dy)` in every halfspace.
    pub fn translate(&self, dx: f64, dy: f64) -> Poly2 {
        let raw: Vec<(Vector2<f64>, f64)> = self
            .hs
            .iter()
            .map(|h| (h.n, h.c + h.n.x * dx + h.n.y * dy))
            .collect();
        from_raw(raw)
    }

    /// Shear by `shear_xy`: substitutes `x -> x - shear_xy*y`, modelling `p <- p + dt*v`.
    pub fn shear(&self, shear_xy: f64) -> Poly2 {
        let raw: Vec<(Vector2<f64>, f64)> = self
            .hs
            .iter()
            .filter_map(|h| canonicalize_unit(Vector2::new(h.n.x, h.n.y - h.n.x * shear_xy), h.c))
            .collect();
        from_raw(raw)
    }

    /// Membership check with slack `eps` (positive enlarges, negative shrinks).
    #[inline]
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.hs.iter().all(|h| h.satisfies_eps(p, eps))
    }

    /// Half-plane intersection (deque sweep on angle-sorted, coalesced constraints).
    pub fn halfspace_intersection_eps(&self, eps: f64) -> HalfspaceIntersection {
        hsi_ordered(&self.hs, eps)
    }

    #[inline]
    pub fn halfspace_intersection(&self) -> HalfspaceIntersection {
        self.halfspace_intersection_eps(0.0)
    }

    #[inline]
    pub fn is_empty_eps(&self, eps: f64) -> bool {
        self.halfspace_intersection_eps(eps).is_empty()
    }

    /// CCW vertex list, or `None` if unbounded or empty.
    pub fn vertices(&self) -> Option<Vec<Vector2<f64>>> {
        self.halfspace_intersection().vertices()
    }

    /// Axis-aligned bounding box `(xmin, ymin, xmax, ymax)` derived from the vertices.
    pub fn bounding_box(&self) -> Result<(f64, f64, f64, f64), ReachError> {
        let verts = self
            .vertices()
            .ok_or_else(|| ReachError::invariant("bounding_box of an unbounded or empty polygon"))?;
        let xmin = verts.iter().map(|v| v.x).fold(f64::INFINITY, f64::min);
        let xmax = verts.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max);
        let ymin = verts.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
        let ymax = verts.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
        Ok((xmin, ymin, xmax, ymax))
    }

    /// Projection interval onto the x-axis, i.e. `[xmin, xmax]`.
    pub fn project_x(&self) -> Result<(f64, f64), ReachError> {
        let (xmin, _, xmax, _) = self.bounding_box()?;
        Ok((xmin, xmax))
    }
}

fn from_raw(raw: Vec<(Vector2<f64>, f64)>) -> Poly2 {
    let mut hs: Vec<Hs2> = raw.into_iter().map(|(n, c)| Hs2::new(n, c)).collect();
    hs.sort_by(|a, b| angle_of(a.n).partial_cmp(&angle_of(b.n)).unwrap_or(std::cmp::Ordering::Equal));
    let mut out = Vec::with_capacity(hs.len());
    for h in hs.drain(..) {
        push_or_coalesce(&mut out, h.n, h.c);
    }
    Poly2 { hs: out }
}

/// HPI result: empty, unbounded, or a bounded CCW vertex list.
#[derive(Clone, Debug)]
pub enum HalfspaceIntersection {
    Empty,
    Unbounded,
    Bounded(Vec<Vector2<f64>>),
}

impl HalfspaceIntersection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, HalfspaceIntersection::Empty)
    }
    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self, HalfspaceIntersection::Bounded(_))
    }
    #[inline]
    pub fn vertices(self) -> Option<Vec<Vector2<f64>>> {
        if let HalfspaceIntersection::Bounded(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

fn hsi_ordered(hs: &[Hs2], eps: f64) -> HalfspaceIntersection {
    use std::collections::VecDeque;
    if hs.is_empty() {
        return HalfspaceIntersection::Unbounded;
    }
    // Fast contradiction check for any opposite parallel pair.
    let angles: Vec<f64> = hs.iter().map(|h| angle_of(h.n)).collect();
    for (i, hi) in hs.iter().enumerate() {
        let ai = angles[i];
        let target = wrap_angle(ai + std::f64::consts::PI);
        let mut lo = 0usize;
        let mut hi_idx = angles.len();
        while lo < hi_idx {
            let mid = (lo + hi_idx) / 2;
            if angles[mid] < target {
                lo = mid + 1;
            } else {
                hi_idx = mid;
            }
        }
        if lo < angles.len() && (angles[lo] - target).abs() < 1e-12 {
            let c1 = hi.c;
            let c2 = hs[lo].c;
            if (-c1).max(-c2) > c1.min(c2) {
                return HalfspaceIntersection::Empty;
            }
        }
    }
    let mut dq: VecDeque<usize> = VecDeque::new();
    let inter = |i1: usize, i2: usize| -> Option<Vector2<f64>> { line_intersection(hs[i1], hs[i2]) };

    for (i, h) in hs.iter().enumerate() {
        while dq.len() >= 2 {
            let l1 = dq[dq.len() - 2];
            let l2 = dq[dq.len() - 1];
            if let Some(p) = inter(l1, l2) {
                if h.satisfies_eps(p, eps) {
                    break;
                }
            }
            dq.pop_back();
        }
        while dq.len() >= 2 {
            let f1 = dq[0];
            let f2 = dq[1];
            if let Some(p) = inter(f1, f2) {
                if h.satisfies_eps(p, eps) {
                    break;
                }
            }
            dq.pop_front();
        }
        dq.push_back(i);
    }
    while dq.len() >= 3 {
        let l1 = dq[dq.len() - 2];
        let l2 = dq[dq.len() - 1];
        if let Some(p) = line_intersection(hs[l1], hs[l2]) {
            if hs[dq[0]].satisfies_eps(p, eps) {
                break;
            }
        }
        dq.pop_back();
    }
    while dq.len() >= 3 {
        let f1 = dq[0];
        let f2 = dq[1];
        if let Some(p) = line_intersection(hs[f1], hs[f2]) {
            if hs[dq[dq.len() - 1]].satisfies_eps(p, eps) {
                break;
            }
        }
        dq.pop_front();
    }
    if dq.is_empty() {
        return HalfspaceIntersection::Empty;
    }
    if dq.len() < 3 {
        return HalfspaceIntersection::Unbounded;
    }
    let m = dq.len();
    let mut verts = Vec::with_capacity(m);
    for k in 0..m {
        let i1 = dq[k];
        let i2 = dq[(k + 1) % m];
        if let Some(p) = line_intersection(hs[i1], hs[i2]) {
            verts.push(p);
        } else {
            return HalfspaceIntersection::Unbounded;
        }
    }
    if verts.len() >= 3 {
        HalfspaceIntersection::Bounded(verts)
    } else {
        HalfspaceIntersection::Unbounded
    }
}

#[inline]
fn wrap_angle(a: f64) -> f64 {
    let mut x = a;
    while x <= -std::f64::consts::PI {
        x += 2.0 * std::f64::consts::PI;
    }
    while x > std::f64::consts::PI {
        x -= 2.0 * std::f64::consts::PI;
    }
    x
}

#[inline]
fn push_or_coalesce(out: &mut Vec<Hs2>, n: Vector2<f64>, c: f64) {
    if let Some(last) = out.last_mut() {
        if (last.n - n).norm() < 1e-9 {
            if c < last.c {
                last.c = c;
            }
            return;
        }
    }
    out.push(Hs2::new(n, c));
}

fn line_intersection(h1: Hs2, h2: Hs2) -> Option<Vector2<f64>> {
    let a = nalgebra::matrix![h1.n.x, h1.n.y; h2.n.x, h2.n.y];
    let det = a.determinant();
    if det.abs() < 1e-12 {
        return None;
    }
    let inv = a.try_inverse()?;
    let rhs = Vector2::new(h1.c, h2.c);
    Some(inv * rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_emptiness_detects_contradiction() {
        let mut p = Poly2::default();
        p.insert_halfspace(Hs2::new(Vector2::new(1.0, 0.0), 0.0));
        p.insert_halfspace(Hs2::new(Vector2::new(-1.0, 0.0), -1.0));
        assert!(matches!(p.halfspace_intersection(), HalfspaceIntersection::Empty));
    }

    #[test]
    fn unit_box_is_bounded() {
        let p = Poly2::from_rect(0.0, 0.0, 1.0, 1.0);
        assert!(p.halfspace_intersection().is_bounded());
    }

    #[test]
    fn intersect_halfspace_rejects_infeasible_cuts() {
        let mut p = Poly2::from_rect(0.0, 0.0, 1.0, 1.0);
        let err = p.intersect_halfspace(1.0, 0.0, -1.0).unwrap_err();
        assert!(matches!(err, ReachError::Infeasible { .. }));
    }

    #[test]
    fn translate_shifts_the_bounding_box() {
        let p = Poly2::from_rect(0.0, 0.0, 1.0, 1.0).translate(2.0, 3.0);
        let bb = p.bounding_box().unwrap();
        assert!((bb.0 - 2.0).abs() < 1e-9 && (bb.2 - 3.0).abs() < 1e-9);
        assert!((bb.1 - 3.0).abs() < 1e-9 && (bb.3 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn shear_skews_a_square_into_a_parallelogram() {
        let p = Poly2::from_rect(0.0, 0.0, 1.0, 1.0).shear(1.0);
        // x -> x - y: the corner (1,1) maps to x=0, and (0,0) stays at x=0.
        let verts = p.vertices().unwrap();
        let xs: Vec<f64> = verts.iter().map(|v| v.x).collect();
        assert!(xs.iter().any(|&x| (x - 0.0).abs() < 1e-9));
        assert!(xs.iter().any(|&x| (x - (-1.0)).abs() < 1e-9) || xs.iter().any(|&x| (x - 1.0).abs() < 1e-9));
    }
}
