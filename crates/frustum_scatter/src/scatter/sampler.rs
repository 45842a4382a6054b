//! Dart-throwing sampler over an arbitrary simple polygon.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geom::Polygon;
use crate::scatter::classes::ClassTable;
use crate::scatter::grid::AccelerationGrid;
use crate::scatter::{rand01, Placement, ScatterConfig};

/// An active point candidates spawn around. The seed spawn is not itself an
/// accepted placement.
#[derive(Clone, Copy)]
struct Spawn {
    position: Vec2,
    class: usize,
}

/// Fills `polygon` with non-overlapping, class-tagged points.
///
/// Active-list dart throwing: starting from a seed spawn at the polygon
/// center, each round picks a random active point and tries up to
/// [`ScatterConfig::max_attempts`] candidates in the annulus `[r, 2r)` around
/// it, where `r` is the larger of the spawn's and the candidate class's
/// effective radius. A candidate must lie inside the polygon, keep its
/// footprint disc clear of every edge, and keep its distance to every accepted
/// neighbor at or above the larger effective radius of the pair. Accepted
/// candidates become spawns themselves; a spawn that exhausts its budget is
/// retired. The loop ends when no spawns remain.
///
/// For any two returned placements `p`, `q`:
/// `distance(p, q) >= max(effective_radius(p), effective_radius(q))`, with
/// `effective_radius = class radius + spacing`.
///
/// A polygon too small to accept anything yields exactly one point at its
/// bounding-box center, tagged with the smallest-radius class, never an empty
/// result. Fewer than three vertices is a contract violation and errors.
pub fn scatter_in_polygon(
    polygon: &Polygon,
    config: &ScatterConfig,
    rng: &mut impl RngCore,
) -> Result<Vec<Placement>> {
    config.validate()?;
    if polygon.len() < 3 {
        return Err(Error::InvalidPolygon(format!(
            "need at least 3 vertices, got {}",
            polygon.len()
        )));
    }

    // Work in a local frame with all coordinates >= 0; undo at the end.
    let (min, max) = polygon.bounds().expect("non-empty polygon has bounds");
    let local = polygon.translated(-min);
    let extent = max - min;

    let table = ClassTable::new(&config.classes, config.spacing);
    let mut grid = AccelerationGrid::new(extent, table.cell_size());
    let mut placements: Vec<Placement> = Vec::new();
    let mut active = vec![Spawn {
        position: extent * 0.5,
        class: table.pick(rng),
    }];

    while !active.is_empty() {
        let spawn_index = random_index(rng, active.len());
        let spawn = active[spawn_index];
        let mut accepted = false;

        for _ in 0..config.max_attempts {
            let angle = rand01(rng) * TAU;
            let direction = Vec2::new(angle.sin(), angle.cos());
            let class = table.pick(rng);
            let gap = table
                .effective_radius(class)
                .max(table.effective_radius(spawn.class));
            let candidate = spawn.position + direction * (gap + rand01(rng) * gap);

            if !is_valid(candidate, class, &local, &table, &grid, &placements) {
                continue;
            }

            grid.insert(candidate, placements.len());
            placements.push(Placement {
                position: candidate,
                class_index: class,
            });
            active.push(Spawn {
                position: candidate,
                class,
            });
            accepted = true;
            break;
        }

        if !accepted {
            active.swap_remove(spawn_index);
        }
    }

    if placements.is_empty() {
        warn!("no candidate fit the polygon; falling back to one center point");
        placements.push(Placement {
            position: extent * 0.5,
            class_index: table.smallest_class(),
        });
    }

    debug!("accepted {} placements", placements.len());

    for placement in &mut placements {
        placement.position += min;
    }
    Ok(placements)
}

fn is_valid(
    candidate: Vec2,
    class: usize,
    polygon: &Polygon,
    table: &ClassTable,
    grid: &AccelerationGrid,
    placements: &[Placement],
) -> bool {
    if !polygon.contains(candidate) {
        return false;
    }

    // The class's true footprint disc must clear every edge; the spacing
    // clearance only applies between points.
    if polygon.min_edge_distance(candidate) <= table.radius(class) {
        return false;
    }

    let effective = table.effective_radius(class);
    for index in grid.occupied_near(candidate, table.search_cells(class)) {
        let other = placements[index];
        let required = effective.max(table.effective_radius(other.class_index));
        if candidate.distance_squared(other.position) < required * required {
            return false;
        }
    }
    true
}

/// Uniform index in `[0, len)`; the clamp absorbs a roll that rounds to 1.
fn random_index(rng: &mut impl RngCore, len: usize) -> usize {
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}
