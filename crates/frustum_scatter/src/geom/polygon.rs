//! Simple polygons on the ground plane.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered list of ground-plane vertices.
///
/// Winding order does not matter to any operation here; containment uses
/// even-odd parity. Polygons are assumed simple (non-self-intersecting);
/// repair of degenerate input is out of scope and callers own that contract.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Create an empty polygon (a camera that sees no ground produces one).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for &v in &self.vertices[1..] {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// A new polygon with every vertex shifted by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
        }
    }

    /// Absolute area by the shoelace formula.
    pub fn area(&self) -> f32 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let mut doubled = 0.0;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let a = self.vertices[j];
            let b = self.vertices[i];
            doubled += a.x * b.y - b.x * a.y;
            j = i;
        }
        doubled.abs() * 0.5
    }

    /// Even-odd ray-cast containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > point.y) != (b.y > point.y) {
                let t = (point.y - a.y) / (b.y - a.y);
                if point.x < a.x + t * (b.x - a.x) {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Smallest distance from `point` to any polygon edge.
    ///
    /// Uses the clamped point-to-segment formula, so vertices count as the
    /// nearest feature when the perpendicular foot falls outside an edge.
    pub fn min_edge_distance(&self, point: Vec2) -> f32 {
        let mut min = f32::INFINITY;
        let mut j = self.vertices.len().wrapping_sub(1);
        for i in 0..self.vertices.len() {
            let d = point_segment_distance(point, self.vertices[j], self.vertices[i]);
            if d < min {
                min = d;
            }
            j = i;
        }
        min
    }
}

impl From<Vec<Vec2>> for Polygon {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Engine-agnostic construction; any `mint`-compatible vector source works.
impl FromIterator<mint::Vector2<f32>> for Polygon {
    fn from_iter<I: IntoIterator<Item = mint::Vector2<f32>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Vec2::from).collect())
    }
}

/// Distance from `point` to the segment `a..b`, projection clamped to [0, 1].
pub(crate) fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(side, 0.0),
            Vec2::new(side, side),
            Vec2::new(0.0, side),
        ])
    }

    #[test]
    fn contains_inside_and_outside() {
        let polygon = square(4.0);
        assert!(polygon.contains(Vec2::new(2.0, 2.0)));
        assert!(polygon.contains(Vec2::new(0.1, 3.9)));
        assert!(!polygon.contains(Vec2::new(-0.1, 2.0)));
        assert!(!polygon.contains(Vec2::new(2.0, 4.1)));
    }

    #[test]
    fn contains_handles_concave_shapes() {
        // An L: the notch around (3, 3) is outside.
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(0.0, 4.0),
        ]);
        assert!(polygon.contains(Vec2::new(1.0, 3.0)));
        assert!(polygon.contains(Vec2::new(3.0, 1.0)));
        assert!(!polygon.contains(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn contains_ignores_winding_order() {
        let ccw = square(4.0);
        let cw = Polygon::new(ccw.vertices().iter().rev().copied().collect());
        let probe = Vec2::new(1.5, 2.5);
        assert_eq!(ccw.contains(probe), cw.contains(probe));
    }

    #[test]
    fn min_edge_distance_uses_clamped_projection() {
        let polygon = square(4.0);
        // Perpendicular foot on the bottom edge.
        let d = polygon.min_edge_distance(Vec2::new(2.0, 1.0));
        assert!((d - 1.0).abs() < 1e-6);
        // Past the corner the vertex is the nearest feature, not the
        // (unclamped) edge line.
        let d = point_segment_distance(
            Vec2::new(5.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
        );
        assert!((d - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        let d = point_segment_distance(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn bounds_and_translation() {
        let polygon = Polygon::new(vec![
            Vec2::new(-2.0, 1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(0.0, 5.0),
        ]);
        let (min, max) = polygon.bounds().unwrap();
        assert_eq!(min, Vec2::new(-2.0, 1.0));
        assert_eq!(max, Vec2::new(3.0, 5.0));

        let moved = polygon.translated(Vec2::new(2.0, -1.0));
        let (min, _) = moved.bounds().unwrap();
        assert_eq!(min, Vec2::new(0.0, 0.0));
        // The source polygon is untouched.
        assert_eq!(polygon.vertices()[0], Vec2::new(-2.0, 1.0));
    }

    #[test]
    fn area_of_known_shapes() {
        assert!((square(4.0).area() - 16.0).abs() < 1e-5);
        let sliver = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 1e-4),
        ]);
        assert!(sliver.area() < 1e-3);
        assert_eq!(Polygon::empty().area(), 0.0);
    }

    #[test]
    fn collects_from_mint_vectors() {
        let polygon: Polygon = vec![
            mint::Vector2 { x: 0.0_f32, y: 0.0 },
            mint::Vector2 { x: 1.0, y: 0.0 },
            mint::Vector2 { x: 0.0, y: 1.0 },
        ]
        .into_iter()
        .collect();
        assert_eq!(polygon.len(), 3);
        assert_eq!(polygon.vertices()[1], Vec2::new(1.0, 0.0));
    }
}
