//! Orbit camera rig.
//!
//! Provides the pivot/camera pose model, resistance-limited orbit and zoom,
//! the skewed projection with deferred rebuilds, and the per-frame
//! controller that feeds classified gestures into the rig.

/// Per-frame driver: classify, scale by frame time, apply, flush.
pub mod controller;
/// Position plus orientation value type.
pub mod pose;
/// Skewed projection matrix and its GPU uniform.
pub mod projection;
/// Direction-aware soft limits.
pub mod resistance;
/// Pivot state and the movement operations.
pub mod rig;
/// Outline of the visible volume.
pub mod volume;

pub use controller::OrbitController;
pub use pose::Pose;
pub use projection::{ProjectionParams, ProjectionUniform, SkewedProjection};
pub use resistance::ResistanceCurve;
pub use rig::{CameraRig, RenderState, RigState};
pub use volume::SkewVolume;
