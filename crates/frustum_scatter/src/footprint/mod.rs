//! Camera-frustum ground footprint projection.
//!
//! [`project_footprint`] intersects a camera's viewing frustum with the ground
//! plane `y = 0` and returns the polygon of ground visible within
//! [`CameraPose::max_distance`]. The ground is treated as flat and
//! unobstructed; occlusion by scene geometry is out of scope.
//!
//! Each footprint edge comes from one of two paths:
//! - **ground intersection** when the edge's center ray meets the plane within
//!   range, with a per-row triangulation correcting for the corner columns of
//!   the pyramid-shaped frustum;
//! - **max-distance clamp** when it does not, intersecting the range sphere
//!   with the ground to find the viewport row that closes the footprint.
use glam::{Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geom::Polygon;

/// Camera pose and lens parameters for one footprint query.
///
/// `pitch_deg` tips the view down from horizontal: 0 looks at the horizon, 90
/// straight down. Roll is not modeled; the footprint math assumes an upright
/// camera. Yaw and the x/z position only rotate and translate the footprint on
/// the ground plane.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraPose {
    /// World position; `y` is the height above the ground plane.
    pub position: Vec3,
    /// Heading around the vertical axis, in degrees.
    pub yaw_deg: f32,
    /// Downward tilt from horizontal, in degrees.
    pub pitch_deg: f32,
    /// Vertical field of view, in degrees.
    pub vfov_deg: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Maximum visibility distance from the camera, in world units.
    pub max_distance: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            yaw_deg: 0.0,
            pitch_deg: 45.0,
            vfov_deg: 60.0,
            aspect: 16.0 / 9.0,
            max_distance: 100.0,
        }
    }
}

impl CameraPose {
    /// Creates a pose at `position` with default lens parameters.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the heading in degrees.
    pub fn with_yaw(mut self, yaw_deg: f32) -> Self {
        self.yaw_deg = yaw_deg;
        self
    }

    /// Sets the downward tilt in degrees.
    pub fn with_pitch(mut self, pitch_deg: f32) -> Self {
        self.pitch_deg = pitch_deg;
        self
    }

    /// Sets the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov_deg: f32) -> Self {
        self.vfov_deg = vfov_deg;
        self
    }

    /// Sets the viewport aspect ratio.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Sets the maximum visibility distance.
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Validates the pose, returning an error if any parameter is unusable.
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() || !self.yaw_deg.is_finite() || !self.pitch_deg.is_finite() {
            return Err(Error::InvalidPose("pose values must be finite".into()));
        }
        if self.position.y <= 0.0 {
            return Err(Error::InvalidPose(
                "camera height must be above the ground plane".into(),
            ));
        }
        if !self.vfov_deg.is_finite() || self.vfov_deg <= 0.0 || self.vfov_deg >= 180.0 {
            return Err(Error::InvalidPose(
                "vertical field of view must be in (0, 180) degrees".into(),
            ));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(Error::InvalidPose("aspect ratio must be > 0".into()));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(Error::InvalidPose("max_distance must be > 0".into()));
        }
        Ok(())
    }
}

/// Projects the visible frustum onto the ground plane.
///
/// Returns the footprint polygon in ground coordinates `(x, z)`: either empty
/// (no ground in view within range) or the bottom-left, bottom-right,
/// top-right, top-left corners with degenerate edges skipped. Callers must
/// accept fewer than four vertices.
pub fn project_footprint(pose: &CameraPose) -> Result<Polygon> {
    pose.validate()?;

    let half_fov = pose.vfov_deg * 0.5;
    let angle_bottom = pose.pitch_deg + half_fov;
    let angle_top = pose.pitch_deg - half_fov;

    // The bottom ray is the steepest; if even it never descends, no ground is
    // visible at any distance.
    if angle_bottom <= 0.0 {
        debug!("footprint has 0 vertices");
        return Ok(Polygon::empty());
    }

    let frustum = Frustum::new(pose);
    let height = pose.position.y;

    // Where the center columns end up at max range decides, per edge, between
    // the ground-intersection path and the max-distance clamp.
    let center_bottom = frustum.point_at(0.5, 0.0, pose.max_distance);
    let center_top = frustum.point_at(0.5, 1.0, pose.max_distance);

    let bottom = if center_bottom.y < 0.0 {
        let depth = edge_length(
            (90.0 - angle_bottom).abs().to_radians(),
            height,
            frustum.triangle_angle(0.0),
        );
        Some((
            frustum.point_at(0.0, 0.0, depth),
            frustum.point_at(1.0, 0.0, depth),
        ))
    } else if angle_bottom > 90.0 {
        // Looking past vertical: the bottom edge closes behind the nadir.
        frustum.clamped_edge(EdgeSide::Behind)
    } else {
        None
    };

    let top = if center_top.y < 0.0 {
        let depth = edge_length(
            (90.0 - angle_top).abs().to_radians(),
            height,
            frustum.triangle_angle(1.0),
        );
        Some((
            frustum.point_at(0.0, 1.0, depth),
            frustum.point_at(1.0, 1.0, depth),
        ))
    } else if center_bottom.y < 0.0 || angle_bottom > 90.0 {
        frustum.clamped_edge(EdgeSide::Ahead)
    } else {
        None
    };

    let mut vertices = Vec::with_capacity(4);
    if let Some((left, right)) = bottom {
        vertices.push(ground(left));
        vertices.push(ground(right));
    }
    if let Some((left, right)) = top {
        vertices.push(ground(right));
        vertices.push(ground(left));
    }

    debug!("footprint has {} vertices", vertices.len());
    Ok(Polygon::new(vertices))
}

/// Which end of the footprint a clamped edge closes.
enum EdgeSide {
    Ahead,
    Behind,
}

/// Precomputed view basis and half-angle tangents for one pose.
struct Frustum {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    tan_v: f32,
    tan_h: f32,
    pitch_deg: f32,
    max_distance: f32,
}

impl Frustum {
    fn new(pose: &CameraPose) -> Self {
        let yaw = pose.yaw_deg.to_radians();
        let pitch = pose.pitch_deg.to_radians();
        let tan_v = (pose.vfov_deg.to_radians() * 0.5).tan();
        Self {
            position: pose.position,
            forward: Vec3::new(
                yaw.sin() * pitch.cos(),
                -pitch.sin(),
                yaw.cos() * pitch.cos(),
            ),
            right: Vec3::new(yaw.cos(), 0.0, -yaw.sin()),
            up: Vec3::new(yaw.sin() * pitch.sin(), pitch.cos(), yaw.cos() * pitch.sin()),
            tan_v,
            tan_h: tan_v * pose.aspect,
            pitch_deg: pose.pitch_deg,
            max_distance: pose.max_distance,
        }
    }

    /// Ray direction through viewport coordinates in [0, 1] (0 = left/bottom).
    fn direction(&self, vx: f32, vy: f32) -> Vec3 {
        (self.forward
            + self.right * ((2.0 * vx - 1.0) * self.tan_h)
            + self.up * ((2.0 * vy - 1.0) * self.tan_v))
            .normalize()
    }

    /// Point at `distance` along the viewport ray.
    fn point_at(&self, vx: f32, vy: f32, distance: f32) -> Vec3 {
        self.position + self.direction(vx, vy) * distance
    }

    /// Angle between the center and corner rays of a viewport row.
    ///
    /// The frustum is a pyramid, not a single plane: the corner column of row
    /// `vy` subtends a wider angle than the center column, and the corner ray
    /// must travel this much farther to reach the same ground line.
    fn triangle_angle(&self, vy: f32) -> f32 {
        let ty = (2.0 * vy - 1.0) * self.tan_v;
        let center = (1.0 + ty * ty).sqrt();
        let corner = (1.0 + ty * ty + self.tan_h * self.tan_h).sqrt();
        (center / corner).acos()
    }

    /// Viewport row whose center ray descends at `depression_deg` below
    /// horizontal. Rows below 0 or above 1 would be outside the frustum; the
    /// callers only ask for rows the edge conditions already proved visible.
    fn row_at_depression(&self, depression_deg: f32) -> f32 {
        let ty = (self.pitch_deg - depression_deg).to_radians().tan();
        (ty / self.tan_v + 1.0) * 0.5
    }

    /// Footprint edge on the max-distance ground circle, or `None` when the
    /// range sphere never reaches the ground.
    fn clamped_edge(&self, side: EdgeSide) -> Option<(Vec3, Vec3)> {
        let height = self.position.y;
        if self.max_distance <= height {
            return None;
        }
        let from_vertical = (height / self.max_distance).acos().to_degrees();
        let depression = match side {
            EdgeSide::Ahead => 90.0 - from_vertical,
            EdgeSide::Behind => 90.0 + from_vertical,
        };
        let row = self.row_at_depression(depression);
        let slant = edge_length(
            from_vertical.to_radians(),
            height,
            self.triangle_angle(row),
        );
        Some((self.point_at(0.0, row, slant), self.point_at(1.0, row, slant)))
    }
}

/// Slant distance along a corner ray until it reaches the ground, given the
/// center ray's angle from vertical and the row's corner-column correction.
fn edge_length(angle_from_vertical: f32, height: f32, triangle_angle: f32) -> f32 {
    (height / angle_from_vertical.cos()) / triangle_angle.cos()
}

fn ground(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_near(actual: Vec2, expected: Vec2, tolerance: f32) {
        assert!(
            (actual - expected).length() < tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn validate_rejects_unusable_poses() {
        assert!(CameraPose::new(Vec3::new(0.0, 0.0, 0.0)).validate().is_err());
        assert!(CameraPose::new(Vec3::new(0.0, -2.0, 0.0)).validate().is_err());
        assert!(CameraPose::default().with_vfov(0.0).validate().is_err());
        assert!(CameraPose::default().with_vfov(180.0).validate().is_err());
        assert!(CameraPose::default().with_aspect(0.0).validate().is_err());
        assert!(CameraPose::default().with_max_distance(-1.0).validate().is_err());
        assert!(CameraPose::default().with_pitch(f32::NAN).validate().is_err());
        assert!(CameraPose::default().validate().is_ok());
    }

    #[test]
    fn view_above_horizon_sees_no_ground() {
        // angle_bottom = pitch + vfov/2 = 0: the steepest ray grazes the
        // horizon and never lands.
        let pose = CameraPose::default().with_pitch(-30.0).with_vfov(60.0);
        let footprint = project_footprint(&pose).unwrap();
        assert!(footprint.is_empty());

        let higher = pose.with_pitch(-40.0);
        assert!(project_footprint(&higher).unwrap().is_empty());
    }

    #[test]
    fn forward_tilt_produces_ground_trapezoid() {
        // h = 10, pitch 60, vfov 60, aspect 16:9, range 50. The bottom center
        // ray points straight down, so the near edge passes through the nadir;
        // the top ray lands at 10 * tan(60 deg) ahead.
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(60.0)
            .with_vfov(60.0)
            .with_aspect(16.0 / 9.0)
            .with_max_distance(50.0);
        let footprint = project_footprint(&pose).unwrap();
        let v = footprint.vertices();
        assert_eq!(v.len(), 4);

        assert_vec2_near(v[0], Vec2::new(-8.8889, 0.0), 1e-2);
        assert_vec2_near(v[1], Vec2::new(8.8889, 0.0), 1e-2);
        assert_vec2_near(v[2], Vec2::new(17.7778, 17.3205), 1e-2);
        assert_vec2_near(v[3], Vec2::new(-17.7778, 17.3205), 1e-2);
    }

    #[test]
    fn straight_down_clamps_both_edges_to_range_circle() {
        // Looking straight down with the range sphere barely reaching the
        // ground: both edges come from the clamp path, one behind the nadir
        // and one ahead.
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(90.0)
            .with_vfov(60.0)
            .with_aspect(1.0)
            .with_max_distance(11.0);
        let footprint = project_footprint(&pose).unwrap();
        let v = footprint.vertices();
        assert_eq!(v.len(), 4);

        // Bottom pair behind (z < 0), top pair ahead (z > 0), symmetric.
        assert!(v[0].y < 0.0 && v[1].y < 0.0);
        assert!(v[2].y > 0.0 && v[3].y > 0.0);
        assert_vec2_near(v[0], Vec2::new(-5.7735, -4.5806), 1e-2);
        assert_vec2_near(v[1], Vec2::new(5.7735, -4.5806), 1e-2);
        assert_vec2_near(v[2], Vec2::new(5.7735, 4.5806), 1e-2);
        assert_vec2_near(v[3], Vec2::new(-5.7735, 4.5806), 1e-2);
    }

    #[test]
    fn range_shorter_than_height_sees_nothing() {
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(90.0)
            .with_vfov(60.0)
            .with_max_distance(9.0);
        assert!(project_footprint(&pose).unwrap().is_empty());
    }

    #[test]
    fn distant_ground_edges_clamp_to_max_distance() {
        // Shallow tilt: the bottom ray lands close, the top ray would land far
        // beyond range, so the far edge is clamped near the range circle.
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(20.0)
            .with_vfov(30.0)
            .with_aspect(1.0)
            .with_max_distance(40.0);
        let footprint = project_footprint(&pose).unwrap();
        let v = footprint.vertices();
        assert_eq!(v.len(), 4);

        // Near edge from the ground path: h / tan(35 deg) ahead.
        let near_z = 10.0 / 35.0_f32.to_radians().tan();
        assert!((v[0].y - near_z).abs() < 0.1);
        // Far edge center sits on the range circle; corners stretch past it
        // but stay well short of the unclamped landing distance.
        let ring = (40.0_f32 * 40.0 - 100.0).sqrt();
        assert!(v[2].y > ring * 0.9 && v[2].y < ring * 1.3);
    }

    #[test]
    fn yaw_and_position_move_the_footprint_rigidly() {
        let base = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(60.0)
            .with_vfov(60.0)
            .with_max_distance(50.0);
        let turned = base.clone().with_yaw(90.0);
        let moved = CameraPose {
            position: Vec3::new(5.0, 10.0, -3.0),
            ..base.clone()
        };

        let reference = project_footprint(&base).unwrap();
        let rotated = project_footprint(&turned).unwrap();
        let translated = project_footprint(&moved).unwrap();

        for (r, b) in rotated.vertices().iter().zip(reference.vertices()) {
            // Yaw 90 maps ground (x, z) to (z, -x).
            assert_vec2_near(*r, Vec2::new(b.y, -b.x), 1e-2);
        }
        for (t, b) in translated.vertices().iter().zip(reference.vertices()) {
            assert_vec2_near(*t, *b + Vec2::new(5.0, -3.0), 1e-2);
        }
    }

    #[test]
    fn clamp_rows_stay_inside_the_viewport() {
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0))
            .with_pitch(90.0)
            .with_vfov(60.0)
            .with_aspect(1.0)
            .with_max_distance(11.0);
        let frustum = Frustum::new(&pose);
        let from_vertical = (10.0_f32 / 11.0).acos().to_degrees();
        let behind = frustum.row_at_depression(90.0 + from_vertical);
        let ahead = frustum.row_at_depression(90.0 - from_vertical);
        assert!((0.0..=1.0).contains(&behind));
        assert!((0.0..=1.0).contains(&ahead));
        assert!(behind < 0.5 && ahead > 0.5);
    }

    #[test]
    fn edge_length_lands_corner_rays_on_the_ground() {
        let pose = CameraPose::new(Vec3::new(0.0, 7.0, 0.0))
            .with_pitch(50.0)
            .with_vfov(45.0)
            .with_max_distance(60.0);
        let frustum = Frustum::new(&pose);
        // Row 0 descends at angle_bottom, row 1 at angle_top.
        for &(row, depression) in &[(0.0_f32, 72.5_f32), (1.0, 27.5)] {
            let theta = (90.0 - depression).abs().to_radians();
            let length = edge_length(theta, 7.0, frustum.triangle_angle(row));
            assert!(frustum.point_at(0.0, row, length).y.abs() < 1e-3);
            assert!(frustum.point_at(1.0, row, length).y.abs() < 1e-3);
        }
    }

    #[test]
    fn clamped_edges_land_on_the_ground() {
        let pose = CameraPose::new(Vec3::new(2.0, 12.0, 1.0))
            .with_pitch(85.0)
            .with_vfov(70.0)
            .with_max_distance(14.0);
        let frustum = Frustum::new(&pose);
        let (left, right) = frustum.clamped_edge(EdgeSide::Ahead).unwrap();
        assert!(left.y.abs() < 1e-3);
        assert!(right.y.abs() < 1e-3);
    }
}
