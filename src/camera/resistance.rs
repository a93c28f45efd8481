//! Soft limits for camera motion.
//!
//! A [`ResistanceCurve`] maps a normalized position inside a configured range
//! to a damping scalar in `[0, 1]`. The rig scales its step by that scalar
//! when the step heads toward the nearer boundary, so motion slows near a
//! limit and stops where the curve reaches zero, while backing away is
//! always free.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::util::curve::{Keyframe, KeyframeCurve};

/// Endpoint values above this trigger a warning at validation time.
const ENDPOINT_TOLERANCE: f32 = 0.05;

/// Authored damping curve over the normalized range `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ResistanceCurve(KeyframeCurve);

impl Default for ResistanceCurve {
    /// Zero at both ends, half strength 2% in from each end, free motion
    /// across the middle 80% of the range.
    fn default() -> Self {
        Self(KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.02, 0.5),
            Keyframe::new(0.1, 1.0),
            Keyframe::new(0.5, 1.0),
            Keyframe::new(0.9, 1.0),
            Keyframe::new(0.98, 0.5),
            Keyframe::new(1.0, 0.0),
        ]))
    }
}

impl ResistanceCurve {
    /// Wrap an authored curve.
    #[must_use]
    pub fn new(curve: KeyframeCurve) -> Self {
        Self(curve)
    }

    /// Curve that never resists (constant 1).
    #[must_use]
    pub fn none() -> Self {
        Self(KeyframeCurve::new(vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(1.0, 1.0),
        ]))
    }

    /// The underlying keyframes.
    #[must_use]
    pub fn keys(&self) -> &[Keyframe] {
        self.0.keys()
    }

    /// Damping scalar at normalized position `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        self.0.evaluate(t).clamp(0.0, 1.0)
    }

    /// Reject curves that cannot produce meaningful damping.
    ///
    /// Requires at least two finite keys in strictly increasing time order
    /// and at least one non-zero value. Endpoints that are not near zero are
    /// allowed but logged, since they let motion run past the range.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::DegenerateCurve`] describing the first problem.
    pub fn validate(&self) -> Result<(), RigError> {
        let keys = self.keys();
        if keys.len() < 2 {
            return Err(RigError::DegenerateCurve(format!(
                "need at least 2 keys, got {}",
                keys.len()
            )));
        }
        if keys
            .iter()
            .any(|k| !k.time.is_finite() || !k.value.is_finite())
        {
            return Err(RigError::DegenerateCurve(
                "non-finite key".to_owned(),
            ));
        }
        if keys.windows(2).any(|w| w[1].time <= w[0].time) {
            return Err(RigError::DegenerateCurve(
                "key times must be strictly increasing".to_owned(),
            ));
        }
        if keys.iter().all(|k| k.value <= 0.0) {
            return Err(RigError::DegenerateCurve(
                "curve is zero everywhere".to_owned(),
            ));
        }

        let (start, end) = (self.sample(0.0), self.sample(1.0));
        if start > ENDPOINT_TOLERANCE || end > ENDPOINT_TOLERANCE {
            log::warn!(
                "resistance curve endpoints ({start}, {end}) are not near \
                 zero; motion may overshoot its limits"
            );
        }
        Ok(())
    }

    /// Resistance scalar for moving from `previous` toward `expected` inside
    /// `[min, max]`.
    ///
    /// Returns the curve sample at the normalized target when the motion
    /// heads outward (toward the nearer boundary), otherwise `1.0`.
    #[must_use]
    pub fn resistance(
        &self,
        min: f32,
        max: f32,
        expected: f32,
        previous: f32,
    ) -> f32 {
        let t = inverse_lerp(min, max, expected);
        let scalar = self.sample(t);

        if scalar < 1.0 {
            if t < 0.5 && expected < previous {
                return scalar;
            }
            if t > 0.5 && expected > previous {
                return scalar;
            }
        }
        1.0
    }
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// A zero-length range maps everything to `0.0`.
#[must_use]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / span).clamp(0.0, 1.0)
}
