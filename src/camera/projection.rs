//! Oblique orthographic projection with a perspective skew term.
//!
//! The matrix keeps the orthographic `m00`/`m11` scale but adds a `w` term
//! that grows with view depth relative to the pivot plane:
//!
//! ```text
//! | 1/(zoom*aspect)  0       0                    0                  |
//! | 0                1/zoom  0                    0                  |
//! | 0                0       -(f+n)/(f-n)         -2fn/(f-n)         |
//! | 0                0       p                    1 - d*p            |
//! ```
//!
//! with `p = -perspective * 0.01` and `d = -distance` (view space looks down
//! -Z). A point on the pivot plane gets `w = 1` for every `p`, so the pivot
//! keeps its apparent size. Positive `perspective` shrinks geometry behind
//! the pivot like a real lens; negative `perspective` grows it (reverse
//! perspective).

use glam::{Mat4, Vec4};

/// Camera parameters that feed the skewed projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Zoom distance level (orthographic half-height).
    pub zoom: f32,
    /// Viewport width / height.
    pub aspect: f32,
    /// Skew amount in percent; 0 is parallel, negative is reverse
    /// perspective.
    pub perspective: f32,
    /// Camera to pivot distance.
    pub distance: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl ProjectionParams {
    /// Signed skew coefficient placed in `m32`.
    #[must_use]
    pub fn skew(&self) -> f32 {
        -self.perspective * 0.01
    }

    /// Build the projection matrix.
    ///
    /// `zoom` and `aspect` must be non-zero; the options validation
    /// guarantees this for rig-owned parameters.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let (n, f) = (self.near, self.far);
        let p = self.skew();
        let d = -self.distance;

        let m00 = 1.0 / (self.zoom * self.aspect);
        let m11 = 1.0 / self.zoom;
        let m22 = -(f + n) / (f - n);
        let m23 = -2.0 * f * n / (f - n);
        let m32 = p;
        let m33 = 1.0 - d * p;

        // glam is column-major: column c holds (m0c, m1c, m2c, m3c)
        Mat4::from_cols(
            Vec4::new(m00, 0.0, 0.0, 0.0),
            Vec4::new(0.0, m11, 0.0, 0.0),
            Vec4::new(0.0, 0.0, m22, m32),
            Vec4::new(0.0, 0.0, m23, m33),
        )
    }
}

/// Projection state with deferred, coalesced rebuilds.
///
/// Setters only record the new value and mark the matrix dirty; the owner
/// calls [`SkewedProjection::flush`] once per tick, so a burst of zoom
/// updates within one frame costs a single rebuild.
#[derive(Debug, Clone)]
pub struct SkewedProjection {
    params: ProjectionParams,
    matrix: Mat4,
    dirty: bool,
    rebuilds: u64,
}

impl SkewedProjection {
    /// Create with an up-to-date matrix.
    #[must_use]
    pub fn new(params: ProjectionParams) -> Self {
        Self {
            matrix: params.matrix(),
            params,
            dirty: false,
            rebuilds: 1,
        }
    }

    /// Current parameters (possibly newer than the matrix).
    #[must_use]
    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Matrix as of the last flush.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Whether a rebuild is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of matrix builds performed so far.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Schedule a zoom change.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.update(|p| p.zoom = zoom);
    }

    /// Schedule an aspect change.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.update(|p| p.aspect = aspect);
    }

    /// Schedule a perspective change.
    pub fn set_perspective(&mut self, perspective: f32) {
        self.update(|p| p.perspective = perspective);
    }

    /// Schedule a camera-to-pivot distance change.
    pub fn set_distance(&mut self, distance: f32) {
        self.update(|p| p.distance = distance);
    }

    fn update(&mut self, apply: impl FnOnce(&mut ProjectionParams)) {
        let before = self.params;
        apply(&mut self.params);
        if self.params != before {
            self.dirty = true;
        }
    }

    /// Rebuild the matrix if anything changed since the last flush.
    ///
    /// Returns `true` when a rebuild happened.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.matrix = self.params.matrix();
        self.rebuilds += 1;
        log::debug!(
            "projection rebuilt: zoom={} aspect={} perspective={} distance={}",
            self.params.zoom,
            self.params.aspect,
            self.params.perspective,
            self.params.distance
        );
        true
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the skewed projection and rig metadata.
pub struct ProjectionUniform {
    /// Column-major projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Pivot world-space position.
    pub pivot: [f32; 3],
    /// Zoom distance level.
    pub zoom: f32,
    /// Camera world-space position.
    pub camera: [f32; 3],
    /// Perspective skew in percent.
    pub perspective: f32,
}

impl Default for ProjectionUniform {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            pivot: [0.0; 3],
            zoom: 1.0,
            camera: [0.0; 3],
            perspective: 0.0,
        }
    }
}
