//! Per-class values derived once per sampling call.
//!
//! Caller-supplied [`SizeClass`] tables are never mutated; this module turns
//! them into a [`ClassTable`] holding everything the dart-throwing loop asks
//! per candidate: effective radii, the cumulative-weight table for class
//! draws, and the per-class neighbor search radius in grid cells.
use rand::RngCore;

use crate::scatter::{rand01, SizeClass};

#[derive(Debug, Clone, Copy)]
struct ClassProps {
    /// The class's true footprint radius.
    radius: f32,
    /// Radius plus the call-wide spacing clearance.
    effective_radius: f32,
    /// Running weight total up to and including this class.
    cumulative_weight: f32,
    /// Neighbor search radius around a candidate, in grid cells.
    search_cells: usize,
}

/// Derived class table shared by one sampling call.
#[derive(Debug, Clone)]
pub(crate) struct ClassTable {
    props: Vec<ClassProps>,
    cell_size: f32,
    total_weight: f32,
    smallest_class: usize,
    last_weighted: usize,
}

impl ClassTable {
    pub fn new(classes: &[SizeClass], spacing: f32) -> Self {
        debug_assert!(!classes.is_empty(), "class table needs at least one class");

        // The grid constant: with cells this size, no cell can hold two points
        // of the smallest class. A zero-weight class still participates here;
        // the smallest radius drives packing density regardless of how often
        // it is drawn.
        let min_effective = classes
            .iter()
            .map(|c| c.radius + spacing)
            .fold(f32::INFINITY, f32::min);
        let cell_size = min_effective / std::f32::consts::SQRT_2;

        let mut smallest_class = 0;
        let mut last_weighted = 0;
        let mut cumulative = 0.0;
        let mut props = Vec::with_capacity(classes.len());
        for (index, class) in classes.iter().enumerate() {
            if class.radius < classes[smallest_class].radius {
                smallest_class = index;
            }
            if class.weight > 0.0 {
                last_weighted = index;
            }
            cumulative += class.weight;
            let effective_radius = class.radius + spacing;
            props.push(ClassProps {
                radius: class.radius,
                effective_radius,
                cumulative_weight: cumulative,
                // Larger classes must look further than the cell size (sized
                // for the smallest class) alone guarantees.
                search_cells: (effective_radius / cell_size).ceil() as usize + 1,
            });
        }

        Self {
            props,
            cell_size,
            total_weight: cumulative,
            smallest_class,
            last_weighted,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn radius(&self, class: usize) -> f32 {
        self.props[class].radius
    }

    pub fn effective_radius(&self, class: usize) -> f32 {
        self.props[class].effective_radius
    }

    pub fn search_cells(&self, class: usize) -> usize {
        self.props[class].search_cells
    }

    /// Index of the smallest-radius class (the fallback class).
    pub fn smallest_class(&self) -> usize {
        self.smallest_class
    }

    /// Draw a class index proportionally to the configured weights.
    pub fn pick(&self, rng: &mut dyn RngCore) -> usize {
        let roll = rand01(rng) * self.total_weight;
        for (index, props) in self.props.iter().enumerate() {
            if roll < props.cumulative_weight {
                return index;
            }
        }
        // Only reachable when the roll rounds up to the exact total; the last
        // positive-weight class owns that sliver.
        self.last_weighted
    }
}
