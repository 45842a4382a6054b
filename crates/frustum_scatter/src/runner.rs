//! One-call pipeline: project the visible-ground footprint, then fill it.
use rand::RngCore;
use tracing::info;

use crate::error::Result;
use crate::footprint::{project_footprint, CameraPose};
use crate::geom::Polygon;
use crate::scatter::{scatter_in_polygon, Placement, ScatterConfig};

/// Result of one footprint-and-scatter run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// The projected ground footprint (possibly empty).
    pub footprint: Polygon,
    /// Placements inside the footprint; empty when nothing is visible.
    pub placements: Vec<Placement>,
}

/// Turns camera poses into ground placements, one call per scenario iteration.
///
/// Holds only the scatter configuration; every run re-projects the footprint
/// and re-scatters from scratch. Callers that want to reuse a footprint across
/// iterations can call [`project_footprint`] and [`scatter_in_polygon`]
/// themselves; caching cadence is caller policy.
#[derive(Debug, Clone)]
pub struct FootprintRunner {
    /// Scatter configuration applied to every run.
    pub scatter: ScatterConfig,
}

impl FootprintRunner {
    /// Creates a runner after validating the scatter configuration.
    pub fn try_new(scatter: ScatterConfig) -> Result<Self> {
        scatter.validate()?;
        Ok(Self { scatter })
    }

    /// Projects `pose`'s footprint and fills it with placements.
    ///
    /// A footprint with fewer than three vertices has no interior to fill and
    /// short-circuits to an empty result.
    pub fn run(&self, pose: &CameraPose, rng: &mut impl RngCore) -> Result<RunResult> {
        let footprint = project_footprint(pose)?;
        if footprint.len() < 3 {
            info!(
                "camera sees no ground within {} units; nothing to place",
                pose.max_distance
            );
            return Ok(RunResult {
                footprint,
                placements: Vec::new(),
            });
        }

        let placements = scatter_in_polygon(&footprint, &self.scatter, rng)?;
        info!(
            "placed {} points over a {}-vertex footprint",
            placements.len(),
            footprint.len()
        );
        Ok(RunResult {
            footprint,
            placements,
        })
    }
}
