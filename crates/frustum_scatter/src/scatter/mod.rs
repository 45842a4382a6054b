//! Weighted blue-noise placement inside arbitrary simple polygons.
//!
//! A dart-throwing sampler in the Bridson style, generalized two ways: the
//! sample region is an arbitrary simple polygon instead of a rectangle, and
//! candidates draw their size class at random from a weighted table, so points
//! of several footprint radii coexist without overlapping.
//!
//! Everything a call needs (derived class table, acceleration grid, active
//! list) is allocated inside the call and dropped on return. Concurrent calls
//! with independent RNGs share nothing.
use glam::Vec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod classes;
mod grid;
mod sampler;

pub use sampler::scatter_in_polygon;

/// Candidate attempts per active point before it is retired.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// One footprint size class available to the sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeClass {
    /// Footprint radius in world units.
    pub radius: f32,
    /// Relative sampling weight; weights need not sum to 1.
    pub weight: f32,
}

impl SizeClass {
    pub fn new(radius: f32, weight: f32) -> Self {
        Self { radius, weight }
    }
}

/// A placed point, tagged with the index of the class it was drawn for.
///
/// Ownership transfers to the caller; whatever gets spawned at the position
/// (and its lifecycle) is caller business.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Ground-plane position in the input polygon's coordinate frame.
    pub position: Vec2,
    /// Index into the configured class list.
    pub class_index: usize,
}

/// Configuration for one sampling call.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScatterConfig {
    /// Size classes candidates are drawn from.
    pub classes: Vec<SizeClass>,
    /// Clearance added to every radius when spacing points apart.
    pub spacing: f32,
    /// Candidate attempts per active point before it is retired.
    pub max_attempts: u32,
}

impl ScatterConfig {
    /// Creates a config with the given classes, no extra spacing, and the
    /// default attempt budget.
    pub fn new(classes: Vec<SizeClass>) -> Self {
        Self {
            classes,
            spacing: 0.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the inter-point clearance.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the candidate attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::InvalidConfig("at least one size class".into()));
        }
        for (index, class) in self.classes.iter().enumerate() {
            if !class.radius.is_finite() || class.radius <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "class {index}: radius must be > 0"
                )));
            }
            if !class.weight.is_finite() || class.weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "class {index}: weight must be >= 0"
                )));
            }
        }
        if self.classes.iter().map(|c| c.weight).sum::<f32>() <= 0.0 {
            return Err(Error::InvalidConfig(
                "total class weight must be > 0".into(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(Error::InvalidConfig("spacing must be >= 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be >= 1".into()));
        }
        Ok(())
    }
}

/// Generate a random float in the range [0, 1].
///
/// The upper bound is reachable only through f32 rounding of near-max draws;
/// callers that index with the result must clamp.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
