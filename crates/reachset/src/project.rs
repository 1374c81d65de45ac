//! Project base sets (pairs of lon/lat polygons) onto the position plane.

use crate::aabb::Aabb;
use crate::error::ReachError;
use crate::poly2::Poly2;

/// One reach node's per-dimension polygons: `polygon_lon` in (s, v_s),
/// `polygon_lat` in (d, v_d).
#[derive(Clone, Debug)]
pub struct ReachNode {
    pub step: usize,
    pub polygon_lon: Poly2,
    pub polygon_lat: Poly2,
}

/// Project every node to its position rectangle, preserving input order.
pub fn project_base_sets_to_position_domain(nodes: &[ReachNode]) -> Result<Vec<Aabb>, ReachError> {
    nodes
        .iter()
        .map(|n| {
            let (s_min, s_max) = n.polygon_lon.project_x()?;
            let (d_min, d_max) = n.polygon_lat.project_x()?;
            Ok(Aabb::new(s_min, d_min, s_max, d_max))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly2::Poly2;

    #[test]
    fn projection_preserves_order_and_takes_the_x_extent() {
        let nodes = vec![
            ReachNode {
                step: 0,
                polygon_lon: Poly2::from_rect(1.0, -5.0, 3.0, 5.0),
                polygon_lat: Poly2::from_rect(-2.0, -1.0, 2.0, 1.0),
            },
            ReachNode {
                step: 0,
                polygon_lon: Poly2::from_rect(10.0, 0.0, 20.0, 0.1),
                polygon_lat: Poly2::from_rect(0.0, 0.0, 1.0, 0.1),
            },
        ];
        let rects = project_base_sets_to_position_domain(&nodes).unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Aabb::new(1.0, -2.0, 3.0, 2.0));
        assert_eq!(rects[1], Aabb::new(10.0, 0.0, 20.0, 1.0));
    }
}
