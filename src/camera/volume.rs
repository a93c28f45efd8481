//! Visible volume of the skewed projection.
//!
//! The cross-section at view depth `z` has half-height
//! `zoom * (1 + 0.01 * perspective * (z - distance))` and a half-width
//! scaled by the aspect ratio. At the pivot depth this is the plain
//! orthographic box; positive perspective widens the far end.

use glam::{Vec2, Vec3};

use super::pose::Pose;
use super::projection::ProjectionParams;

/// Corner pairs forming the outline: near rectangle, side edges, far
/// rectangle, pivot-plane rectangle.
pub const EDGES: [(usize, usize); 16] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (8, 9),
    (9, 10),
    (10, 11),
    (11, 8),
];

/// Half extents of the cross-section at view depth `depth`.
///
/// The result may be negative when a strong reverse perspective folds the
/// volume past its apex; such setups are still reported as computed.
#[must_use]
pub fn half_extents(params: &ProjectionParams, depth: f32) -> Vec2 {
    let scale =
        1.0 + 0.01 * params.perspective * (depth - params.distance);
    let half_height = params.zoom * scale;
    Vec2::new(half_height * params.aspect, half_height)
}

/// Twelve corners of the skewed volume: near plane, far plane, pivot plane,
/// each ordered top-right, top-left, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewVolume {
    /// Corners in the order used by [`EDGES`].
    pub corners: [Vec3; 12],
}

impl SkewVolume {
    /// Volume in view space (camera at the origin looking down -Z).
    #[must_use]
    pub fn from_params(params: &ProjectionParams) -> Self {
        let depths = [params.near, params.far, params.distance];
        let mut corners = [Vec3::ZERO; 12];
        for (plane, depth) in depths.into_iter().enumerate() {
            let half = half_extents(params, depth);
            let quad = [
                Vec3::new(half.x, half.y, -depth),
                Vec3::new(-half.x, half.y, -depth),
                Vec3::new(-half.x, -half.y, -depth),
                Vec3::new(half.x, -half.y, -depth),
            ];
            corners[plane * 4..plane * 4 + 4].copy_from_slice(&quad);
        }
        Self { corners }
    }

    /// Same volume placed by the camera pose.
    #[must_use]
    pub fn transformed(&self, camera: &Pose) -> Self {
        Self {
            corners: self.corners.map(|c| camera.transform_point(c)),
        }
    }

    /// Near-plane corners.
    #[must_use]
    pub fn near(&self) -> &[Vec3] {
        &self.corners[0..4]
    }

    /// Far-plane corners.
    #[must_use]
    pub fn far(&self) -> &[Vec3] {
        &self.corners[4..8]
    }

    /// Pivot-plane corners.
    #[must_use]
    pub fn pivot_plane(&self) -> &[Vec3] {
        &self.corners[8..12]
    }

    /// Outline as line segments, for debug drawing.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        EDGES
            .iter()
            .map(|&(a, b)| (self.corners[a], self.corners[b]))
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec4};

    use super::*;

    fn params(perspective: f32) -> ProjectionParams {
        ProjectionParams {
            zoom: 2.0,
            aspect: 1.5,
            perspective,
            distance: 4.0,
            near: 0.3,
            far: 50.0,
        }
    }

    #[test]
    fn orthographic_volume_is_a_box() {
        let v = SkewVolume::from_params(&params(0.0));
        for (n, f) in v.near().iter().zip(v.far()) {
            assert_eq!(n.truncate(), f.truncate());
        }
        assert_eq!(v.corners[0], Vec3::new(3.0, 2.0, -0.3));
    }

    #[test]
    fn pivot_plane_matches_zoom_for_any_perspective() {
        for perspective in [-20.0, 0.0, 5.0, 40.0] {
            let v = SkewVolume::from_params(&params(perspective));
            let top_right = v.pivot_plane()[0];
            assert!((top_right - Vec3::new(3.0, 2.0, -4.0)).length() < 1e-5);
        }
    }

    #[test]
    fn positive_perspective_widens_far_end() {
        let v = SkewVolume::from_params(&params(5.0));
        assert!(v.far()[0].y > v.pivot_plane()[0].y);
        assert!(v.near()[0].y < v.pivot_plane()[0].y);
    }

    #[test]
    fn corners_land_on_clip_edges() {
        let p = params(3.0);
        let m = p.matrix();
        let v = SkewVolume::from_params(&p);
        for corner in v.corners {
            let clip = m * Vec4::new(corner.x, corner.y, corner.z, 1.0);
            let ndc = clip.truncate() / clip.w;
            assert!((ndc.x.abs() - 1.0).abs() < 1e-4, "{corner} -> {ndc}");
            assert!((ndc.y.abs() - 1.0).abs() < 1e-4, "{corner} -> {ndc}");
        }
    }

    #[test]
    fn transformed_follows_camera_pose() {
        let camera = Pose::new(
            Vec3::new(0.0, 0.0, 10.0),
            Quat::from_rotation_y(std::f32::consts::PI),
        );
        let v = SkewVolume::from_params(&params(0.0)).transformed(&camera);
        // turned around: the volume now extends toward +Z
        assert!(v.far()[0].z > camera.position.z);
        assert_eq!(v.segments().count(), 16);
    }
}
