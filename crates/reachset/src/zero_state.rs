//! Zero-state polygon: the single-step reachable set of a double integrator
//! started at the origin, in (position, velocity) coordinates.

use nalgebra::Vector2;

use crate::error::ReachError;
use crate::poly2::Poly2;

/// Axis-aligned bounding box of the zero-state set, before the tangent cuts.
pub fn create_bounding_box(dt: f64, a_min: f64, a_max: f64) -> Poly2 {
    let pmin = 0.5 * a_min * dt * dt;
    let pmax = 0.5 * a_max * dt * dt;
    let vmin = a_min * dt;
    let vmax = a_max * dt;
    Poly2::from_rect(pmin, vmin, pmax, vmax)
}

/// Upper/lower tangent halfspaces at switching time `gamma * dt`, returned as
/// `(a, b, c)` triples meaning `a*p + b*v <= c`.
///
/// The upper halfspace is tangent to the max-then-min bang-bang trajectory;
/// the lower halfspace is its point reflection through the origin (the
/// min-then-max trajectory), obtained by negating both normal and offset.
pub fn compute_halfspace_coefficients(
    dt: f64,
    a_min: f64,
    a_max: f64,
    gamma: f64,
) -> ((f64, f64, f64), (f64, f64, f64)) {
    let (p_u, v_u, m_u) = tangent_point_and_slope(dt, a_max, a_min, gamma);
    let upper = match m_u {
        Some(m) => (m, -1.0, m * p_u - v_u),
        None => (1.0, 0.0, p_u),
    };
    let (p_l, v_l, m_l) = tangent_point_and_slope(dt, a_min, a_max, gamma);
    let lower = match m_l {
        Some(m) => (-m, 1.0, v_l - m * p_l),
        None => (-1.0, 0.0, -p_l),
    };
    (upper, lower)
}

/// Position/velocity reached at switching time `gamma*dt` under acceleration
/// `a_first` for `[0, gamma*dt)` then `a_second` for `[gamma*dt, dt]`, plus
/// the (p,v) tangent slope `1 / (dt*(1-gamma))`, or `None` at `gamma>=1`
/// where the tangent is vertical (already implied by the bounding box).
fn tangent_point_and_slope(dt: f64, a_first: f64, a_second: f64, gamma: f64) -> (f64, f64, Option<f64>) {
    let tau = gamma * dt;
    let rem = dt - tau;
    let v = a_first * tau + a_second * rem;
    let p = 0.5 * a_first * tau * tau + a_first * tau * rem + 0.5 * a_second * rem * rem;
    if gamma >= 1.0 - 1e-12 {
        (p, v, None)
    } else {
        (p, v, Some(1.0 / (dt * (1.0 - gamma))))
    }
}

/// The two characteristic switching times that yield the tight hexagonal
/// over-approximation of the curved double-integrator envelope.
const CHARACTERISTIC_GAMMAS: [f64; 2] = [0.0, 0.5];

/// Build the zero-state polygon: the bounding box intersected with the
/// tangent halfspace pairs at the two characteristic switching times.
pub fn create_zero_state_polygon(dt: f64, a_min: f64, a_max: f64) -> Result<Poly2, ReachError> {
    let mut poly = create_bounding_box(dt, a_min, a_max);
    for &gamma in &CHARACTERISTIC_GAMMAS {
        let (upper, lower) = compute_halfspace_coefficients(dt, a_min, a_max, gamma);
        poly.intersect_halfspace(upper.0, upper.1, upper.2)?;
        poly.intersect_halfspace(lower.0, lower.1, lower.2)?;
    }
    Ok(poly)
}
