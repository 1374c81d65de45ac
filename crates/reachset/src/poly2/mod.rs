//! 2D convex polygon kernel: a strict, angle-ordered halfspace representation.
//!
//! Double-integrator reachable sets are always convex polytopes with at most
//! six vertices; the H-representation admits O(k) intersections which
//! dominate propagation cost.

pub mod ordered;
pub mod rand;
mod types;
mod util;

pub use ordered::{HalfspaceIntersection, Poly2};
pub use types::Hs2;
pub use util::from_points_convex_hull_strict;
