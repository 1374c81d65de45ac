//! Property-based tests for the repartitioner's disjointness and union-preservation laws.

use proptest::prelude::*;
use reachset::aabb::Aabb;
use reachset::repartition::create_repartitioned_rectangles;

fn rect_strategy() -> impl Strategy<Value = Aabb> {
    (-20.0f64..20.0, -20.0f64..20.0, 0.5f64..8.0, 0.5f64..8.0).prop_map(|(x, y, w, h)| Aabb::new(x, y, x + w, y + h))
}

fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.xmin < b.xmax && b.xmin < a.xmax && a.ymin < b.ymax && b.ymin < a.ymax
}

fn contains_point(r: &Aabb, x: f64, y: f64) -> bool {
    x >= r.xmin && x <= r.xmax && y >= r.ymin && y <= r.ymax
}

proptest! {
    // Outward-rounded repartition output rectangles have pairwise empty interiors.
    #[test]
    fn repartitioned_rectangles_are_pairwise_disjoint(rects in prop::collection::vec(rect_strategy(), 1..8)) {
        let out = create_repartitioned_rectangles(&rects, 0.5).unwrap();
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                prop_assert!(!overlaps(&out[i], &out[j]));
            }
        }
    }

    // The repartitioned cover contains every corner of every input rectangle.
    #[test]
    fn repartitioned_cover_contains_every_input_corner(rects in prop::collection::vec(rect_strategy(), 1..8)) {
        let out = create_repartitioned_rectangles(&rects, 0.5).unwrap();
        for r in &rects {
            for &(x, y) in &[(r.xmin, r.ymin), (r.xmax, r.ymin), (r.xmin, r.ymax), (r.xmax, r.ymax)] {
                prop_assert!(out.iter().any(|o| contains_point(o, x, y)));
            }
        }
    }

    // An empty input always yields an empty output, for any grid size.
    #[test]
    fn empty_input_yields_empty_output(delta in 0.01f64..10.0) {
        let out = create_repartitioned_rectangles(&[], delta).unwrap();
        prop_assert!(out.is_empty());
    }

    // A non-positive grid size is always rejected for a non-empty input
    // (an empty input short-circuits before the grid size is even examined).
    #[test]
    fn nonpositive_delta_is_rejected_for_nonempty_input(rects in prop::collection::vec(rect_strategy(), 1..4), delta in -5.0f64..=0.0) {
        prop_assert!(create_repartitioned_rectangles(&rects, delta).is_err());
    }
}
