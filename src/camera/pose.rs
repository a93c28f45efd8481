use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World-space position and orientation of a rig element.
///
/// A plain value: the rig computes poses without touching any host
/// transform, then hands them to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Pose from parts.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Same rotation, new position.
    #[must_use]
    pub const fn with_position(self, position: Vec3) -> Self {
        Self::new(position, self.rotation)
    }

    /// Rotate the whole pose by `rotation` about the world-space `point`.
    #[must_use]
    pub fn rotated_around(self, point: Vec3, rotation: Quat) -> Self {
        Self::new(
            rotation * (self.position - point) + point,
            (rotation * self.rotation).normalize(),
        )
    }

    /// Map a point from this pose's local space into world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Local +X in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local +Y in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local -Z in world space (the viewing direction of a rig camera).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Whether both poses agree within `epsilon` (position distance and
    /// rotation angle in radians).
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.distance(other.position) <= epsilon
            && self.rotation.angle_between(other.rotation) <= epsilon
    }
}
