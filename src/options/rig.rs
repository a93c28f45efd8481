use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::ResistanceCurve;
use crate::error::RigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rig", inline)]
#[serde(default)]
/// Orbit limits, drag scalars and the resistance curve.
pub struct RigOptions {
    /// Closest zoom distance level. Must be above zero.
    #[schemars(title = "Min Zoom", range(min = 0.05, max = 5.0), extend("step" = 0.05))]
    pub zoom_min: f32,
    /// Farthest zoom distance level.
    #[schemars(title = "Max Zoom", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub zoom_max: f32,
    /// Zoom level at construction, clamped into the zoom range.
    #[schemars(skip)]
    pub initial_zoom: f32,
    /// Horizontal pan per pixel; also scales zoom deltas.
    #[schemars(title = "Horizontal Pan", range(min = -1.0, max = 1.0), extend("step" = 0.0025))]
    pub x_ortho_scalar: f32,
    /// Vertical pan per pixel.
    #[schemars(title = "Vertical Pan", range(min = -1.0, max = 1.0), extend("step" = 0.0025))]
    pub y_ortho_scalar: f32,
    /// Yaw degrees per horizontal pixel.
    #[schemars(title = "Yaw Speed", range(min = -1.0, max = 1.0), extend("step" = 0.05))]
    pub x_angle_scalar: f32,
    /// Pitch degrees per vertical pixel.
    #[schemars(title = "Pitch Speed", range(min = -1.0, max = 1.0), extend("step" = 0.05))]
    pub y_angle_scalar: f32,
    /// Soft upper pitch limit in degrees (camera above the pivot).
    #[schemars(title = "Max Pitch", range(min = 50.0, max = 90.0), extend("step" = 1.0))]
    pub pitch_max: f32,
    /// Soft lower pitch limit in degrees.
    #[schemars(title = "Min Pitch", range(min = -25.0, max = 25.0), extend("step" = 1.0))]
    pub pitch_min: f32,
    /// Camera distance behind the pivot per unit of zoom.
    #[schemars(skip)]
    pub camera_distance_ratio: f32,
    /// Multiplier applied to `dt` before scaling a frame's delta.
    #[schemars(skip)]
    pub delta_time_scale: f32,
    /// Pivot world position at construction.
    #[schemars(skip)]
    pub initial_pivot: [f32; 3],
    /// Damping curve shared by the pitch and zoom limits.
    #[schemars(skip)]
    pub resistance: ResistanceCurve,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            zoom_min: 0.25,
            zoom_max: 12.0,
            initial_zoom: 5.0,
            x_ortho_scalar: -0.01,
            y_ortho_scalar: -0.0075,
            x_angle_scalar: 0.6,
            y_angle_scalar: -0.4,
            pitch_max: 80.0,
            pitch_min: -25.0,
            camera_distance_ratio: 2.0,
            delta_time_scale: 100.0,
            initial_pivot: [0.0, 1.0, 0.0],
            resistance: ResistanceCurve::default(),
        }
    }
}

impl RigOptions {
    /// Reject ranges the rig cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the zoom, pitch or curve error for the first bad setting.
    pub fn validate(&self) -> Result<(), RigError> {
        let (min, max) = (self.zoom_min, self.zoom_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
            return Err(RigError::InvalidZoomRange { min, max });
        }
        let (min, max) = (self.pitch_min, self.pitch_max);
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(RigError::InvalidPitchRange { min, max });
        }
        self.resistance.validate()
    }
}
