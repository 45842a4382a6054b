#![forbid(unsafe_code)]
//! frustum_scatter: visible-ground footprints filled with weighted blue noise.
//!
//! Modules:
//! - geom: ground-plane polygon primitives (containment, edge distance)
//! - footprint: camera-frustum ground footprint projection
//! - scatter: weighted multi-class Poisson-disk sampling inside polygons
//! - runner: one-call footprint-then-scatter pipeline
//!
//! Both core components are synchronous pure functions of their inputs plus an
//! explicit RNG; nothing persists between calls. For examples and docs, see
//! README and docs.rs.
pub mod error;
pub mod footprint;
pub mod geom;
pub mod runner;
pub mod scatter;

/// Convenient re-exports for common types. Import with `use frustum_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::footprint::{project_footprint, CameraPose};
    pub use crate::geom::Polygon;
    pub use crate::runner::{FootprintRunner, RunResult};
    pub use crate::scatter::{
        scatter_in_polygon, Placement, ScatterConfig, SizeClass, DEFAULT_MAX_ATTEMPTS,
    };
}
