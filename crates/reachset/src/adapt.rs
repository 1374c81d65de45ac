//! Recombine drivable-area rectangles with propagated base sets into the
//! next step's reach nodes.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::aabb::Aabb;
use crate::error::ReachError;
use crate::poly2::from_points_convex_hull_strict;
use crate::project::{project_base_sets_to_position_domain, ReachNode};

/// For each index `i` in `a`, the ordered list of indices `j` in `b` with
/// strict AABB overlap. Indices with no overlap are omitted.
pub fn create_adjacency_map(a: &[Aabb], b: &[Aabb]) -> BTreeMap<usize, Vec<usize>> {
    let mut map = BTreeMap::new();
    for (i, ra) in a.iter().enumerate() {
        let targets: Vec<usize> = b
            .iter()
            .enumerate()
            .filter(|(_, rb)| ra.overlaps_strict(rb))
            .map(|(j, _)| j)
            .collect();
        if !targets.is_empty() {
            map.insert(i, targets);
        }
    }
    map
}

/// Intersect the convex hull of `polygon_lon` over `adjacency` with the
/// vertical strip `[rect.xmin, rect.xmax]`, and symmetrically for
/// `polygon_lat` against `[rect.ymin, rect.ymax]`. Drops the node if either
/// resulting polygon is empty.
fn adapt_base_set_to_drivable_area(
    step: usize,
    rect: Aabb,
    nodes: &[ReachNode],
    adjacency: &[usize],
) -> Result<Option<ReachNode>, ReachError> {
    let lon_verts: Vec<_> = adjacency
        .iter()
        .filter_map(|&j| nodes[j].polygon_lon.vertices())
        .flatten()
        .collect();
    let lat_verts: Vec<_> = adjacency
        .iter()
        .filter_map(|&j| nodes[j].polygon_lat.vertices())
        .flatten()
        .collect();

    let lon_hull = from_points_convex_hull_strict(&lon_verts)
        .ok_or_else(|| ReachError::invariant("adapt: longitudinal hull over adjacency degenerated"))?;
    let lat_hull = from_points_convex_hull_strict(&lat_verts)
        .ok_or_else(|| ReachError::invariant("adapt: lateral hull over adjacency degenerated"))?;

    let mut polygon_lon = lon_hull;
    if polygon_lon.intersect_halfspace(1.0, 0.0, rect.xmax).is_err() {
        return Ok(None);
    }
    if polygon_lon.intersect_halfspace(-1.0, 0.0, -rect.xmin).is_err() {
        return Ok(None);
    }

    let mut polygon_lat = lat_hull;
    if polygon_lat.intersect_halfspace(1.0, 0.0, rect.ymax).is_err() {
        return Ok(None);
    }
    if polygon_lat.intersect_halfspace(-1.0, 0.0, -rect.ymin).is_err() {
        return Ok(None);
    }

    Ok(Some(ReachNode { step, polygon_lon, polygon_lat }))
}

/// Recombine the surviving drivable-area rectangles of step `t` with the
/// propagated base sets of `t-1 -> t`, yielding step `t`'s reach nodes.
/// Parallelized over drivable-area rectangles with a deterministic,
/// input-index-ordered output.
pub fn adapt_base_sets_to_drivable_area(
    step: usize,
    drivable_area_t: &[Aabb],
    propagated_nodes: &[ReachNode],
    threads: usize,
) -> Result<Vec<ReachNode>, ReachError> {
    let projected = project_base_sets_to_position_domain(propagated_nodes)?;
    let adjacency = create_adjacency_map(drivable_area_t, &projected);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ReachError::invariant(format!("failed to build a {threads}-thread pool: {e}")))?;

    let results: Vec<Result<Option<ReachNode>, ReachError>> = pool.install(|| {
        drivable_area_t
            .par_iter()
            .enumerate()
            .map(|(i, &rect)| match adjacency.get(&i) {
                Some(adj) => adapt_base_set_to_drivable_area(step, rect, propagated_nodes, adj),
                None => Ok(None),
            })
            .collect()
    });

    let mut nodes = Vec::with_capacity(results.len());
    for r in results {
        if let Some(node) = r? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}
