//! Orchestrates propagation, projection, repartition, collision splitting
//! and adaptation across the planning horizon.

use tracing::{error, info, info_span, warn};

use crate::aabb::Aabb;
use crate::collision::{check_collision_and_split_rectangles, CollisionChecker};
use crate::config::Configuration;
use crate::error::ReachError;
use crate::poly2::Poly2;
use crate::project::{project_base_sets_to_position_domain, ReachNode};
use crate::propagate::propagate;
use crate::repartition::create_repartitioned_rectangles;
use crate::zero_state::create_zero_state_polygon;
use crate::adapt::adapt_base_sets_to_drivable_area;

/// Per-step output: the drivable area and the reach nodes that survived it.
pub struct StepResult {
    pub drivable_area: Vec<Aabb>,
    pub nodes: Vec<ReachNode>,
}

/// The initial (degenerate) drivable-area rectangle around `initial.{p_lon,p_lat}`.
pub fn generate_tuple_vertices_position_rectangle_initial(cfg: &Configuration) -> Aabb {
    let i = &cfg.initial;
    Aabb::new(
        i.p_lon - i.p_lon_eps,
        i.p_lat - i.p_lat_eps,
        i.p_lon + i.p_lon_eps,
        i.p_lat + i.p_lat_eps,
    )
}

/// The initial (lon, lat) polygons, each a small box around `(p, v)`.
pub fn generate_tuples_vertices_polygons_initial(cfg: &Configuration) -> (Poly2, Poly2) {
    let i = &cfg.initial;
    let lon = Poly2::from_rect(
        i.p_lon - i.p_lon_eps,
        i.v_lon - i.v_lon_eps,
        i.p_lon + i.p_lon_eps,
        i.v_lon + i.v_lon_eps,
    );
    let lat = Poly2::from_rect(
        i.p_lat - i.p_lat_eps,
        i.v_lat - i.v_lat_eps,
        i.p_lat + i.p_lat_eps,
        i.v_lat + i.v_lat_eps,
    );
    (lon, lat)
}

fn initial_step(cfg: &Configuration) -> StepResult {
    let rect = generate_tuple_vertices_position_rectangle_initial(cfg);
    let (polygon_lon, polygon_lat) = generate_tuples_vertices_polygons_initial(cfg);
    StepResult {
        drivable_area: vec![rect],
        nodes: vec![ReachNode { step: 0, polygon_lon, polygon_lat }],
    }
}

/// Run the full per-step pipeline for `t = 1..=cfg.planning.steps`, starting
/// from the initial drivable area and reach node.
///
/// Returns the sequence of per-step results (index 0 is the initial step).
/// A step that yields no nodes ends the sequence early (success: the
/// vehicle is trapped).
pub fn run<C: CollisionChecker>(cfg: &Configuration, checker: &C) -> Result<Vec<StepResult>, ReachError> {
    cfg.validate()?;
    let threads = cfg.reachable_set.num_threads;
    let mut history = vec![initial_step(cfg)];

    let z_lon = create_zero_state_polygon(cfg.planning.dt, cfg.vehicle.a_lon_min, cfg.vehicle.a_lon_max)?;
    let z_lat = create_zero_state_polygon(cfg.planning.dt, cfg.vehicle.a_lat_min, cfg.vehicle.a_lat_max)?;

    for t in 1..=cfg.planning.steps {
        let span = info_span!("step", t);
        let _enter = span.enter();

        let prev_nodes = &history.last().expect("history seeded with the initial step").nodes;
        let propagated: Vec<ReachNode> = prev_nodes
            .iter()
            .filter_map(|n| propagate_node(n, &z_lon, &z_lat, cfg, t).transpose())
            .collect::<Result<_, _>>()?;

        if propagated.is_empty() {
            warn!(t, "no base sets survived propagation; vehicle trapped");
            break;
        }

        let projected = project_base_sets_to_position_domain(&propagated)?;
        let drivable_area = create_repartitioned_rectangles(&projected, cfg.planning.size_grid)?;
        let split = check_collision_and_split_rectangles(
            t,
            checker,
            &drivable_area,
            cfg.reachable_set.radius_terminal_split,
            threads,
        )
        .map_err(|e| {
            error!(t, error = %e, "reach analysis aborted");
            e
        })?;

        let nodes = adapt_base_sets_to_drivable_area(t, &split, &propagated, threads)?;
        info!(t, nodes = nodes.len(), drivable = split.len(), "step complete");

        if nodes.is_empty() {
            warn!(t, "no reach nodes survived adaptation; vehicle trapped");
            history.push(StepResult { drivable_area: split, nodes });
            break;
        }
        history.push(StepResult { drivable_area: split, nodes });
    }
    Ok(history)
}

fn propagate_node(
    n: &ReachNode,
    z_lon: &Poly2,
    z_lat: &Poly2,
    cfg: &Configuration,
    t: usize,
) -> Result<Option<ReachNode>, ReachError> {
    let lon = propagate(
        &n.polygon_lon,
        z_lon,
        cfg.planning.dt,
        cfg.vehicle.v_lon_min,
        cfg.vehicle.v_lon_max,
    );
    let lat = propagate(
        &n.polygon_lat,
        z_lat,
        cfg.planning.dt,
        cfg.vehicle.v_lat_min,
        cfg.vehicle.v_lat_max,
    );
    match (lon, lat) {
        (Ok(polygon_lon), Ok(polygon_lat)) => Ok(Some(ReachNode { step: t, polygon_lon, polygon_lat })),
        (Err(ReachError::Infeasible { .. }), _) | (_, Err(ReachError::Infeasible { .. })) => Ok(None),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aabb::Aabb as TestAabb;
    use crate::collision::CollisionStep;
    use crate::config::{Initial, Planning, ReachableSet, VehicleEgo};

    struct NeverCollides;
    impl CollisionStep for NeverCollides {
        fn collides(&self, _aabb: TestAabb) -> Result<bool, String> {
            Ok(false)
        }
    }
    struct OpenRoad;
    impl CollisionChecker for OpenRoad {
        type Step<'a> = NeverCollides;
        fn at(&self, _step: usize) -> NeverCollides {
            NeverCollides
        }
    }

    fn cfg() -> Configuration {
        Configuration {
            planning: Planning { dt: 0.5, steps: 3, size_grid: 0.5 },
            vehicle: VehicleEgo {
                v_lon_min: 0.0,
                v_lon_max: 10.0,
                a_lon_min: -2.0,
                a_lon_max: 2.0,
                v_lat_min: -1.0,
                v_lat_max: 1.0,
                a_lat_min: -1.0,
                a_lat_max: 1.0,
                radius_disc: 1.0,
            },
            reachable_set: ReachableSet {
                radius_terminal_split: 0.05,
                num_threads: 2,
                rasterize_obstacles: false,
            },
            initial: Initial::default(),
        }
    }

    #[test]
    fn initial_drivable_area_matches_the_reference_example() {
        let c = cfg();
        let rect = generate_tuple_vertices_position_rectangle_initial(&c);
        assert_eq!(rect, TestAabb::new(-0.01, -0.01, 0.01, 0.01));
    }

    #[test]
    fn an_open_road_produces_steps_nodes_on_every_step() {
        let c = cfg();
        let checker = OpenRoad;
        let history = run(&c, &checker).unwrap();
        assert_eq!(history.len(), c.planning.steps + 1);
        for step in &history {
            assert!(!step.nodes.is_empty());
        }
    }

    #[test]
    fn an_invalid_configuration_is_rejected_before_any_step_runs() {
        let mut c = cfg();
        c.planning.dt = -1.0;
        let checker = OpenRoad;
        assert!(run(&c, &checker).is_err());
    }
}
