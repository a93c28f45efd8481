use super::rig::{CameraRig, RenderState};
use crate::error::RigError;
use crate::input::{GestureClassifier, MovementIntent, PointerSample, Viewport};
use crate::options::Options;

/// Per-frame driver tying the gesture classifier to the camera rig.
///
/// The embedding loop calls [`OrbitController::tick`] once per frame before
/// anything reads the camera. Each tick classifies the sample, scales the
/// delta by frame time, applies it, and flushes the projection.
#[derive(Debug, Clone)]
pub struct OrbitController {
    classifier: GestureClassifier,
    rig: CameraRig,
    delta_time_scale: f32,
    last_intent: MovementIntent,
}

impl OrbitController {
    /// Validate `options` and build the classifier and rig.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, or
    /// [`RigError::InvalidViewport`] for a degenerate `viewport`.
    pub fn new(
        options: &Options,
        viewport: Viewport,
    ) -> Result<Self, RigError> {
        options.validate()?;
        let rig = CameraRig::new(&options.rig, &options.projection, viewport)?;
        let classifier = GestureClassifier::new(
            options.gesture.clone(),
            options.bindings,
            viewport,
        );
        Ok(Self {
            classifier,
            rig,
            delta_time_scale: options.rig.delta_time_scale,
            last_intent: MovementIntent::NONE,
        })
    }

    /// Advance one frame.
    ///
    /// `dt` is the frame time in seconds; negative or non-finite values are
    /// treated as zero.
    pub fn tick(&mut self, dt: f32, sample: &PointerSample) -> RenderState {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let intent = self.classifier.classify(sample);
        self.last_intent = intent;

        self.rig.apply(intent.scaled(dt * self.delta_time_scale));
        let _ = self.rig.flush();
        self.rig.render_state()
    }

    /// Propagate a window resize to the classifier and the rig.
    ///
    /// Degenerate sizes (a minimized window reports 0x0) are ignored by both,
    /// so they keep agreeing on the last valid viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Err(e) = viewport.validate() {
            log::warn!("ignoring resize: {e}");
            return;
        }
        self.classifier.set_viewport(viewport);
        self.rig.resize(viewport);
    }

    /// Intent produced by the most recent tick, before time scaling.
    #[must_use]
    pub fn last_intent(&self) -> MovementIntent {
        self.last_intent
    }

    /// The camera rig.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Mutable access for direct edits (retarget, perspective, restore).
    /// Changes reach the matrix on the next tick.
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// The gesture classifier.
    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Mutable access to the classifier (e.g. to swap mouse binds).
    pub fn classifier_mut(&mut self) -> &mut GestureClassifier {
        &mut self.classifier
    }
}
