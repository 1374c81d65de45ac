//! Per-step reachable-set computation for automated road vehicles.
//!
//! Given decoupled longitudinal/lateral double-integrator dynamics, an
//! initial state, a time-varying collision environment, and a planning
//! horizon, this crate computes, for each step, the drivable area (a
//! disjoint union of position rectangles) and the reach nodes needed to
//! propagate the next step.

pub mod aabb;
pub mod adapt;
pub mod collision;
pub mod config;
pub mod driver;
pub mod error;
pub mod poly2;
pub mod project;
pub mod propagate;
pub mod repartition;
pub mod zero_state;

pub use aabb::Aabb;
pub use config::Configuration;
pub use error::ReachError;
pub use project::ReachNode;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
