//! Flat configuration schema for a reachable-set analysis run.
//!
//! Mirrors the external scenario format (YAML/JSON loading is out of scope
//! here; this struct is the hydration target for that external loader).

use serde::{Deserialize, Serialize};

use crate::error::ReachError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Planning {
    pub dt: f64,
    pub steps: usize,
    pub size_grid: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VehicleEgo {
    pub v_lon_min: f64,
    pub v_lon_max: f64,
    pub a_lon_min: f64,
    pub a_lon_max: f64,
    pub v_lat_min: f64,
    pub v_lat_max: f64,
    pub a_lat_min: f64,
    pub a_lat_max: f64,
    pub radius_disc: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ReachableSet {
    pub radius_terminal_split: f64,
    pub num_threads: usize,
    pub rasterize_obstacles: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Initial {
    pub p_lon: f64,
    pub p_lat: f64,
    pub p_lon_eps: f64,
    pub p_lat_eps: f64,
    pub v_lon: f64,
    pub v_lat: f64,
    pub v_lon_eps: f64,
    pub v_lat_eps: f64,
}

impl Default for Initial {
    fn default() -> Self {
        Self {
            p_lon: 0.0,
            p_lat: 0.0,
            p_lon_eps: 0.01,
            p_lat_eps: 0.01,
            v_lon: 0.0,
            v_lat: 0.0,
            v_lon_eps: 0.0,
            v_lat_eps: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub planning: Planning,
    pub vehicle: VehicleEgo,
    pub reachable_set: ReachableSet,
    pub initial: Initial,
}

impl Configuration {
    /// Check the parameter range invariants required before a run starts.
    pub fn validate(&self) -> Result<(), ReachError> {
        if !(self.planning.dt > 0.0) {
            return Err(ReachError::config("planning.dt", self.planning.dt, "must be > 0"));
        }
        if !(self.planning.size_grid > 0.0) {
            return Err(ReachError::config(
                "planning.size_grid",
                self.planning.size_grid,
                "must be > 0",
            ));
        }
        let v = &self.vehicle;
        if v.v_lon_min > v.v_lon_max {
            return Err(ReachError::config("vehicle.ego.v_lon_min", v.v_lon_min, "must be <= v_lon_max"));
        }
        if v.v_lat_min > v.v_lat_max {
            return Err(ReachError::config("vehicle.ego.v_lat_min", v.v_lat_min, "must be <= v_lat_max"));
        }
        if v.a_lon_min > v.a_lon_max {
            return Err(ReachError::config("vehicle.ego.a_lon_min", v.a_lon_min, "must be <= a_lon_max"));
        }
        if v.a_lat_min > v.a_lat_max {
            return Err(ReachError::config("vehicle.ego.a_lat_min", v.a_lat_min, "must be <= a_lat_max"));
        }
        if !(self.reachable_set.radius_terminal_split > 0.0) {
            return Err(ReachError::config(
                "reachable_set.radius_terminal_split",
                self.reachable_set.radius_terminal_split,
                "must be > 0",
            ));
        }
        if self.reachable_set.num_threads == 0 {
            return Err(ReachError::config(
                "reachable_set.num_threads",
                0.0,
                "must be >= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Configuration {
        Configuration {
            planning: Planning { dt: 0.2, steps: 10, size_grid: 0.5 },
            vehicle: VehicleEgo {
                v_lon_min: 0.0,
                v_lon_max: 20.0,
                a_lon_min: -5.0,
                a_lon_max: 3.0,
                v_lat_min: -2.0,
                v_lat_max: 2.0,
                a_lat_min: -2.0,
                a_lat_max: 2.0,
                radius_disc: 1.5,
            },
            reachable_set: ReachableSet {
                radius_terminal_split: 0.1,
                num_threads: 4,
                rasterize_obstacles: false,
            },
            initial: Initial::default(),
        }
    }

    #[test]
    fn accepts_a_representative_valid_configuration() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_nonpositive_dt() {
        let mut c = valid();
        c.planning.dt = 0.0;
        assert!(matches!(c.validate(), Err(ReachError::Config { parameter: "planning.dt", .. })));
    }

    #[test]
    fn rejects_nonpositive_grid() {
        let mut c = valid();
        c.planning.size_grid = -1.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_inverted_velocity_bounds() {
        let mut c = valid();
        c.vehicle.v_lon_min = 10.0;
        c.vehicle.v_lon_max = 1.0;
        assert!(c.validate().is_err());

        let mut c2 = valid();
        c2.vehicle.v_lat_min = 10.0;
        c2.vehicle.v_lat_max = 1.0;
        assert!(c2.validate().is_err());
    }

    #[test]
    fn rejects_inverted_acceleration_bounds() {
        let mut c = valid();
        c.vehicle.a_lon_min = 10.0;
        c.vehicle.a_lon_max = 1.0;
        assert!(c.validate().is_err());

        let mut c2 = valid();
        c2.vehicle.a_lat_min = 10.0;
        c2.vehicle.a_lat_max = 1.0;
        assert!(c2.validate().is_err());
    }
}
