//! Propagate a base polygon one time step through double-integrator dynamics.

use nalgebra::Vector2;

use crate::error::ReachError;
use crate::poly2::{from_points_convex_hull_strict, Poly2};

/// Shear `base` by `dt` (models `p <- p + dt*v`), Minkowski-sum with the
/// zero-state polygon `z` (translate `z` by every vertex of the sheared
/// polygon and hull the union), then clip to `v in [v_min, v_max]`.
pub fn propagate(base: &Poly2, z: &Poly2, dt: f64, v_min: f64, v_max: f64) -> Result<Poly2, ReachError> {
    let sheared = base.shear(dt);
    let sheared_verts = sheared
        .vertices()
        .ok_or_else(|| ReachError::invariant("propagate: sheared base polygon is unbounded or empty"))?;
    let z_verts = z
        .vertices()
        .ok_or_else(|| ReachError::invariant("propagate: zero-state polygon is unbounded or empty"))?;

    let mut summed_points: Vec<Vector2<f64>> = Vec::with_capacity(sheared_verts.len() * z_verts.len());
    for &bv in &sheared_verts {
        for &zv in &z_verts {
            summed_points.push(bv + zv);
        }
    }
    let summed = from_points_convex_hull_strict(&summed_points)
        .ok_or_else(|| ReachError::invariant("propagate: Minkowski sum hull degenerated"))?;

    let mut clipped = summed;
    clipped.intersect_halfspace(0.0, 1.0, v_max)?;
    clipped.intersect_halfspace(0.0, -1.0, -v_min)?;
    Ok(clipped)
}
