use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::pose::Pose;
use super::projection::{ProjectionParams, ProjectionUniform, SkewedProjection};
use super::volume::SkewVolume;
use crate::error::RigError;
use crate::input::{Movement, MovementIntent, Viewport};
use crate::options::{ProjectionOptions, RigOptions};

/// Mutable orbit state: everything needed to reproduce the rig's pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigState {
    /// Rotation about world up in degrees, kept in `[0, 360)`.
    pub yaw: f32,
    /// Elevation in degrees; positive puts the camera above the pivot.
    pub pitch: f32,
    /// Pivot world position.
    pub pivot: Vec3,
    /// Zoom distance level.
    pub zoom: f32,
    /// Perspective skew in percent.
    pub perspective: f32,
}

/// Snapshot handed to the renderer after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderState {
    /// Pivot pose.
    pub pivot: Pose,
    /// Camera pose.
    pub camera: Pose,
    /// World to view transform.
    pub view: Mat4,
    /// Skewed projection as of the last flush.
    pub projection: Mat4,
    /// Zoom distance level.
    pub zoom: f32,
    /// Perspective skew in percent.
    pub perspective: f32,
}

impl RenderState {
    /// Pack for upload as a GPU uniform.
    #[must_use]
    pub fn uniform(&self) -> ProjectionUniform {
        ProjectionUniform {
            projection: self.projection.to_cols_array_2d(),
            pivot: self.pivot.position.to_array(),
            zoom: self.zoom,
            camera: self.camera.position.to_array(),
            perspective: self.perspective,
        }
    }
}

/// Orbit camera rig: a pivot pose, a camera offset behind it, and the
/// skewed projection derived from the zoom level.
///
/// The camera is not a child node of anything. Its pose is computed from the
/// pivot pose and [`CameraRig::camera_local_offset`] whenever it is asked
/// for.
#[derive(Debug, Clone)]
pub struct CameraRig {
    options: RigOptions,
    state: RigState,
    projection: SkewedProjection,
    viewport: Viewport,
}

impl CameraRig {
    /// Build a rig at its configured initial pose.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure among the rig options, the clip
    /// planes and the viewport.
    pub fn new(
        rig: &RigOptions,
        projection: &ProjectionOptions,
        viewport: Viewport,
    ) -> Result<Self, RigError> {
        rig.validate()?;
        projection.validate()?;
        viewport.validate()?;

        let zoom = rig.initial_zoom.clamp(rig.zoom_min, rig.zoom_max);
        let state = RigState {
            yaw: 0.0,
            pitch: 0.0,
            pivot: Vec3::from_array(rig.initial_pivot),
            zoom,
            perspective: projection.perspective,
        };
        let params = ProjectionParams {
            zoom,
            aspect: viewport.aspect(),
            perspective: projection.perspective,
            distance: zoom * rig.camera_distance_ratio,
            near: projection.near,
            far: projection.far,
        };

        log::info!(
            "camera rig ready: zoom={zoom} range=[{}, {}] viewport={}x{}",
            rig.zoom_min,
            rig.zoom_max,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            options: rig.clone(),
            state,
            projection: SkewedProjection::new(params),
            viewport,
        })
    }

    /// Options the rig was built with.
    #[must_use]
    pub fn options(&self) -> &RigOptions {
        &self.options
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> RigState {
        self.state
    }

    /// Last accepted viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.state.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.state.pitch
    }

    /// Zoom distance level.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.state.zoom
    }

    /// Projection state, including any pending rebuild.
    #[must_use]
    pub fn projection(&self) -> &SkewedProjection {
        &self.projection
    }

    /// Pivot orientation from yaw and pitch.
    fn rotation(yaw: f32, pitch: f32) -> Quat {
        Quat::from_rotation_y(yaw.to_radians())
            * Quat::from_rotation_x(-pitch.to_radians())
    }

    /// Pivot pose in world space.
    #[must_use]
    pub fn pivot_pose(&self) -> Pose {
        Pose::new(
            self.state.pivot,
            Self::rotation(self.state.yaw, self.state.pitch),
        )
    }

    /// Camera position relative to the pivot, in pivot space.
    #[must_use]
    pub fn camera_local_offset(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_distance())
    }

    /// Camera pose in world space. The camera shares the pivot's
    /// orientation, so it always looks straight at the pivot.
    #[must_use]
    pub fn camera_pose(&self) -> Pose {
        let pivot = self.pivot_pose();
        pivot.with_position(pivot.transform_point(self.camera_local_offset()))
    }

    fn camera_distance(&self) -> f32 {
        self.state.zoom * self.options.camera_distance_ratio
    }

    /// Dispatch one classified intent.
    pub fn apply(&mut self, intent: MovementIntent) {
        match intent.movement {
            Movement::None => {}
            Movement::PanSpherical => self.pan_spherical(intent.delta),
            Movement::PanOrthogonal => self.pan_orthogonal(intent.delta),
            Movement::LookAround => self.tilt(intent.delta),
            Movement::Zoom => self.zoom_by(intent.delta.y),
        }
    }

    /// Pitch after moving by `step` degrees, softly limited by the
    /// resistance curve.
    fn resisted_pitch(&self, step: f32) -> f32 {
        let RigOptions {
            pitch_min,
            pitch_max,
            ref resistance,
            ..
        } = self.options;
        let pitch = self.state.pitch;
        let expected = pitch + step;
        let scalar =
            resistance.resistance(pitch_min, pitch_max, expected, pitch);
        if scalar < 1.0 {
            pitch + step * scalar
        } else {
            expected
        }
    }

    fn turned_yaw(&self, step: f32) -> f32 {
        (self.state.yaw + step).rem_euclid(360.0)
    }

    /// Orbit the camera around the pivot.
    ///
    /// `delta.y` drives pitch through the resistance curve, `delta.x` drives
    /// yaw freely.
    pub fn pan_spherical(&mut self, delta: Vec2) {
        self.state.pitch =
            self.resisted_pitch(delta.y * self.options.y_angle_scalar);
        self.state.yaw = self.turned_yaw(delta.x * self.options.x_angle_scalar);
    }

    /// Free-look: swing the pivot around the camera position.
    ///
    /// Only the dominant axis of `delta` is used. The camera stays where it
    /// is while the pivot moves.
    pub fn tilt(&mut self, delta: Vec2) {
        let before = self.pivot_pose();
        let camera = self.camera_pose().position;

        let (yaw, pitch) = if delta.y.abs() > delta.x.abs() {
            let pitch =
                self.resisted_pitch(delta.y * self.options.y_angle_scalar);
            (self.state.yaw, pitch)
        } else {
            let yaw = self.turned_yaw(delta.x * self.options.x_angle_scalar);
            (yaw, self.state.pitch)
        };

        let swing = Self::rotation(yaw, pitch) * before.rotation.inverse();
        let after = before.rotated_around(camera, swing);
        self.state.yaw = yaw;
        self.state.pitch = pitch;
        self.state.pivot = after.position;
    }

    /// Slide the pivot along the camera's right and up axes.
    ///
    /// The step grows with the zoom level so a drag covers the same share of
    /// the screen at every zoom.
    pub fn pan_orthogonal(&mut self, delta: Vec2) {
        let pose = self.pivot_pose();
        let zoom = self.state.zoom;
        let right = pose.right() * delta.x * self.options.x_ortho_scalar;
        let up = pose.up() * delta.y * self.options.y_ortho_scalar;
        self.state.pivot += (right + up) * zoom;
    }

    /// Change the zoom level by `delta` input units.
    ///
    /// Outward moves inside the resisted band are first halved, then scaled
    /// by the curve sample at the halved target. The result is always
    /// clamped to the configured range.
    pub fn zoom_by(&mut self, delta: f32) {
        let RigOptions {
            zoom_min,
            zoom_max,
            x_ortho_scalar,
            ref resistance,
            ..
        } = self.options;
        let zoom = self.state.zoom;

        let mut step = delta * x_ortho_scalar;
        let mut scalar =
            resistance.resistance(zoom_min, zoom_max, zoom + step, zoom);
        if scalar < 1.0 {
            step *= 0.5;
            scalar =
                resistance.resistance(zoom_min, zoom_max, zoom + step, zoom);
        }

        self.set_zoom(zoom + step * scalar);
    }

    /// Jump to `zoom`, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = zoom.clamp(self.options.zoom_min, self.options.zoom_max);
        self.state.zoom = zoom;
        self.projection.set_zoom(zoom);
        self.projection.set_distance(self.camera_distance());
    }

    /// Set the perspective skew in percent. Non-finite values are ignored.
    pub fn set_perspective(&mut self, perspective: f32) {
        if !perspective.is_finite() {
            log::warn!("ignoring non-finite perspective {perspective}");
            return;
        }
        self.state.perspective = perspective;
        self.projection.set_perspective(perspective);
    }

    /// Track a new viewport. Degenerate sizes are ignored so the projection
    /// never divides by a zero aspect.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Err(e) = viewport.validate() {
            log::warn!("ignoring resize: {e}");
            return;
        }
        self.viewport = viewport;
        self.projection.set_aspect(viewport.aspect());
    }

    /// Move the pivot to `position`, keeping orientation and zoom.
    pub fn retarget(&mut self, position: Vec3) {
        log::debug!("pivot retargeted to {position}");
        self.state.pivot = position;
    }

    /// Copy a saved state into the rig. Yaw is wrapped and zoom clamped.
    pub fn restore(&mut self, state: RigState) {
        self.state.yaw = state.yaw.rem_euclid(360.0);
        self.state.pitch = state.pitch;
        self.state.pivot = state.pivot;
        self.set_zoom(state.zoom);
        self.set_perspective(state.perspective);
    }

    /// Rebuild the projection if anything changed. Call once per tick.
    pub fn flush(&mut self) -> bool {
        self.projection.flush()
    }

    /// World-space outline of what the camera sees, from the current
    /// (possibly unflushed) projection parameters.
    #[must_use]
    pub fn volume(&self) -> SkewVolume {
        SkewVolume::from_params(self.projection.params())
            .transformed(&self.camera_pose())
    }

    /// Current poses and matrices.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        let camera = self.camera_pose();
        let view =
            Mat4::from_rotation_translation(camera.rotation, camera.position)
                .inverse();
        RenderState {
            pivot: self.pivot_pose(),
            camera,
            view,
            projection: self.projection.matrix(),
            zoom: self.state.zoom,
            perspective: self.state.perspective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ResistanceCurve;
    use crate::util::curve::{Keyframe, KeyframeCurve};

    fn rig_with(options: RigOptions) -> CameraRig {
        CameraRig::new(
            &options,
            &ProjectionOptions::default(),
            Viewport::new(1600.0, 900.0),
        )
        .unwrap()
    }

    fn rig() -> CameraRig {
        rig_with(RigOptions::default())
    }

    #[test]
    fn starts_at_configured_pose() {
        let rig = rig();
        let state = rig.state();
        assert_eq!(state.yaw, 0.0);
        assert_eq!(state.pitch, 0.0);
        assert_eq!(state.pivot, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(state.zoom, 5.0);
        let camera = rig.camera_pose().position;
        assert!(camera.distance(Vec3::new(0.0, 1.0, 10.0)) < 1e-5);
    }

    #[test]
    fn initial_zoom_is_clamped() {
        let rig = rig_with(RigOptions {
            initial_zoom: 100.0,
            ..RigOptions::default()
        });
        assert_eq!(rig.zoom(), 12.0);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let bad_zoom = RigOptions {
            zoom_min: 0.0,
            ..RigOptions::default()
        };
        let result = CameraRig::new(
            &bad_zoom,
            &ProjectionOptions::default(),
            Viewport::default(),
        );
        assert!(matches!(result, Err(RigError::InvalidZoomRange { .. })));

        let result = CameraRig::new(
            &RigOptions::default(),
            &ProjectionOptions::default(),
            Viewport::new(0.0, 900.0),
        );
        assert!(matches!(result, Err(RigError::InvalidViewport { .. })));
    }

    #[test]
    fn horizontal_drag_turns_yaw_only() {
        let mut rig = rig();
        rig.pan_spherical(Vec2::new(5.0, 0.0));
        assert!((rig.yaw() - 5.0 * 0.6).abs() < 1e-5);
        assert_eq!(rig.pitch(), 0.0);
    }

    #[test]
    fn yaw_wraps_into_full_turn() {
        let mut rig = rig();
        rig.pan_spherical(Vec2::new(-10.0, 0.0));
        assert!((rig.yaw() - 354.0).abs() < 1e-3);
        rig.pan_spherical(Vec2::new(20.0, 0.0));
        assert!((rig.yaw() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn positive_pitch_lifts_camera() {
        let mut rig = rig();
        // y_angle_scalar is negative: dragging up raises the camera
        rig.pan_spherical(Vec2::new(0.0, -50.0));
        assert!(rig.pitch() > 0.0);
        let pivot = rig.pivot_pose().position;
        assert!(rig.camera_pose().position.y > pivot.y);
        assert!(rig.camera_pose().forward().y < 0.0);
    }

    #[test]
    fn pitch_never_passes_zero_valued_boundary() {
        let mut rig = rig();
        for _ in 0..200 {
            rig.pan_spherical(Vec2::new(0.0, -10.0));
            assert!(rig.pitch() <= 80.0);
        }
        assert!(rig.pitch() > 60.0);

        for _ in 0..200 {
            rig.pan_spherical(Vec2::new(0.0, 10.0));
            assert!(rig.pitch() >= -25.0);
        }
        assert!(rig.pitch() < -10.0);
    }

    #[test]
    fn pitch_overshoots_with_nonzero_boundary() {
        let half = ResistanceCurve::new(KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.5),
            Keyframe::new(1.0, 0.5),
        ]));
        let mut rig = rig_with(RigOptions {
            resistance: half,
            ..RigOptions::default()
        });
        for _ in 0..100 {
            rig.pan_spherical(Vec2::new(0.0, -10.0));
        }
        assert!(rig.pitch() > 80.0);
    }

    #[test]
    fn backing_away_from_pitch_limit_is_free() {
        let mut rig = rig();
        rig.restore(RigState {
            pitch: 79.0,
            ..rig.state()
        });
        rig.pan_spherical(Vec2::new(0.0, 10.0));
        assert!((rig.pitch() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn tilt_keeps_camera_in_place() {
        for delta in [Vec2::new(12.0, 3.0), Vec2::new(-2.0, -15.0)] {
            let mut rig = rig();
            let before = rig.camera_pose().position;
            rig.tilt(delta);
            let after = rig.camera_pose().position;
            assert!(before.distance(after) < 1e-4, "{before} vs {after}");
            assert!(rig.pivot_pose().position.distance(before) > 1.0);
        }
    }

    #[test]
    fn tilt_matches_swinging_pivot_around_camera() {
        let mut rig = rig();
        let pivot = rig.pivot_pose();
        let camera = rig.camera_pose().position;
        rig.tilt(Vec2::new(10.0, 0.0));

        let swing = Quat::from_rotation_y(6.0_f32.to_radians());
        let expected = pivot.rotated_around(camera, swing);
        assert!(rig.pivot_pose().approx_eq(&expected, 5e-3));
    }

    #[test]
    fn tilt_uses_dominant_axis_only() {
        let mut rig = rig();
        rig.tilt(Vec2::new(10.0, 4.0));
        assert_eq!(rig.pitch(), 0.0);
        assert!((rig.yaw() - 6.0).abs() < 1e-4);

        let mut rig = self::rig();
        rig.tilt(Vec2::new(4.0, -10.0));
        assert_eq!(rig.yaw(), 0.0);
        assert!((rig.pitch() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn orthogonal_pan_scales_with_zoom() {
        let mut near = rig();
        near.set_zoom(2.0);
        let start = near.pivot_pose().position;
        near.pan_orthogonal(Vec2::new(10.0, 0.0));
        let near_step = near.pivot_pose().position - start;

        let mut far = rig();
        far.set_zoom(4.0);
        far.pan_orthogonal(Vec2::new(10.0, 0.0));
        let far_step = far.pivot_pose().position - start;

        // camera right is +X at yaw 0, and x_ortho_scalar is negative
        assert!((near_step.x - (-0.2)).abs() < 1e-5);
        assert!((far_step.x - 2.0 * near_step.x).abs() < 1e-5);
        assert!(near_step.y.abs() < 1e-6 && near_step.z.abs() < 1e-6);
    }

    #[test]
    fn orthogonal_pan_follows_camera_axes() {
        let mut rig = rig();
        rig.restore(RigState {
            yaw: 90.0,
            ..rig.state()
        });
        let start = rig.pivot_pose().position;
        rig.pan_orthogonal(Vec2::new(0.0, 10.0));
        let step = rig.pivot_pose().position - start;
        // up stays world up at zero pitch
        assert!((step.y - 10.0 * -0.0075 * 5.0).abs() < 1e-5);
        assert!(step.x.abs() < 1e-5 && step.z.abs() < 1e-5);
    }

    #[test]
    fn zoom_below_minimum_clamps_exactly() {
        let curves = [ResistanceCurve::default(), ResistanceCurve::none()];
        for curve in curves {
            let mut rig = rig_with(RigOptions {
                resistance: curve,
                ..RigOptions::default()
            });
            for start in [0.25, 1.0, 6.0] {
                rig.set_zoom(start);
                for delta in [30.0, 1000.0, 1.0e6] {
                    rig.zoom_by(delta);
                    assert!(rig.zoom() >= 0.25);
                }
            }
            rig.set_zoom(0.1);
            assert_eq!(rig.zoom(), 0.25);
        }

        let mut free = rig_with(RigOptions {
            resistance: ResistanceCurve::none(),
            ..RigOptions::default()
        });
        free.zoom_by(1000.0);
        assert_eq!(free.zoom(), 0.25);
    }

    #[test]
    fn zoom_at_curve_zero_does_not_move_outward() {
        let mut rig = rig();
        rig.set_zoom(0.25);
        rig.zoom_by(50.0);
        assert_eq!(rig.zoom(), 0.25);

        rig.set_zoom(12.0);
        rig.zoom_by(-50.0);
        assert_eq!(rig.zoom(), 12.0);
    }

    #[test]
    fn zoom_away_from_limit_is_free() {
        let mut rig = rig();
        rig.set_zoom(0.25);
        rig.zoom_by(-100.0);
        assert!((rig.zoom() - 1.25).abs() < 1e-4);
    }

    #[test]
    fn resisted_zoom_is_halved() {
        let mut rig = rig_with(RigOptions {
            resistance: ResistanceCurve::new(KeyframeCurve::new(vec![
                Keyframe::new(0.0, 0.5),
                Keyframe::new(1.0, 0.5),
            ])),
            ..RigOptions::default()
        });
        rig.set_zoom(2.0);
        // outward in the lower half: step -1.0 halved to -0.5, scaled by 0.5
        rig.zoom_by(100.0);
        assert!((rig.zoom() - 1.75).abs() < 1e-4);
    }

    #[test]
    fn scroll_intent_moves_zoom() {
        let mut rig = rig();
        rig.apply(MovementIntent::zoom(100.0));
        assert!(rig.zoom() < 5.0);
        rig.apply(MovementIntent::NONE);
        let zoom = rig.zoom();
        rig.apply(MovementIntent::NONE);
        assert_eq!(rig.zoom(), zoom);
    }

    #[test]
    fn projection_scale_terms_track_aspect() {
        let mut rig = rig();
        let aspect = rig.viewport().aspect();
        let mut zoom = 0.25;
        while zoom <= 12.0 {
            rig.set_zoom(zoom);
            let _ = rig.flush();
            let m = rig.render_state().projection;
            let (m00, m11) = (m.x_axis.x, m.y_axis.y);
            assert!((m00 * aspect - m11).abs() <= 1e-5 * m11.abs());
            zoom += 0.35;
        }
    }

    #[test]
    fn zoom_burst_rebuilds_once() {
        let mut rig = rig();
        let before = rig.projection().rebuild_count();
        for _ in 0..10 {
            rig.zoom_by(3.0);
        }
        assert!(rig.projection().is_dirty());
        assert!(rig.flush());
        assert!(!rig.flush());
        assert_eq!(rig.projection().rebuild_count(), before + 1);
    }

    #[test]
    fn matrix_waits_for_flush() {
        let mut rig = rig();
        let before = rig.render_state().projection;
        rig.set_zoom(2.0);
        assert_eq!(rig.render_state().projection, before);
        let _ = rig.flush();
        assert_ne!(rig.render_state().projection, before);
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut rig = rig();
        rig.resize(Viewport::new(0.0, 0.0));
        assert_eq!(rig.viewport(), Viewport::new(1600.0, 900.0));
        assert!(!rig.projection().is_dirty());

        rig.resize(Viewport::new(1000.0, 1000.0));
        assert!(rig.projection().is_dirty());
        assert_eq!(rig.projection().params().aspect, 1.0);
    }

    #[test]
    fn retarget_moves_pivot_and_camera_together() {
        let mut rig = rig();
        rig.pan_spherical(Vec2::new(20.0, -30.0));
        let offset = rig.camera_pose().position - rig.pivot_pose().position;
        rig.retarget(Vec3::new(5.0, 0.0, -3.0));
        assert_eq!(rig.pivot_pose().position, Vec3::new(5.0, 0.0, -3.0));
        let moved = rig.camera_pose().position - rig.pivot_pose().position;
        assert!(offset.distance(moved) < 1e-5);
    }

    #[test]
    fn view_puts_pivot_ahead_of_camera() {
        let mut rig = rig();
        rig.pan_spherical(Vec2::new(40.0, -40.0));
        let state = rig.render_state();
        let eye = state.view.transform_point3(state.camera.position);
        let pivot = state.view.transform_point3(state.pivot.position);
        assert!(eye.length() < 1e-4);
        assert!(pivot.truncate().length() < 1e-4);
        assert!((pivot.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn volume_pivot_plane_surrounds_pivot() {
        let mut rig = rig();
        rig.pan_spherical(Vec2::new(30.0, -20.0));
        let volume = rig.volume();
        let center = volume.pivot_plane().iter().copied().sum::<Vec3>() / 4.0;
        assert!(center.distance(rig.pivot_pose().position) < 1e-4);
    }

    #[test]
    fn uniform_mirrors_render_state() {
        let mut rig = rig();
        rig.set_perspective(25.0);
        let _ = rig.flush();
        let state = rig.render_state();
        let uniform = state.uniform();
        assert_eq!(uniform.zoom, state.zoom);
        assert_eq!(uniform.perspective, 25.0);
        assert_eq!(uniform.projection, state.projection.to_cols_array_2d());
        assert_eq!(uniform.camera, state.camera.position.to_array());
    }
}
