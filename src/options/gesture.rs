use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// What a two-finger frame does when its direction dot product falls
/// between the pan and pinch thresholds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Emit no movement for the frame.
    #[default]
    Reset,
    /// Keep the last two-finger classification while the same two fingers
    /// stay down.
    HoldLast,
}

/// How raw pixel deltas are scaled before classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DeltaNormalization {
    /// Pixels as reported by the device.
    #[default]
    Raw,
    /// `delta / screen_size * dpi`: physical-size independent drags.
    Dpi,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gestures", inline)]
#[serde(default)]
/// Touch gesture disambiguation parameters.
pub struct GestureOptions {
    /// Dot-product threshold separating two-finger pan (above) from pinch
    /// (below its negation).
    #[schemars(title = "Pinch Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub pinch_threshold: f32,
    /// Behaviour for two-finger frames between the thresholds.
    #[schemars(title = "Ambiguous Gestures")]
    pub ambiguity: AmbiguityPolicy,
    /// Delta scaling mode.
    #[schemars(title = "Delta Scaling")]
    pub normalization: DeltaNormalization,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.9,
            ambiguity: AmbiguityPolicy::Reset,
            normalization: DeltaNormalization::Raw,
        }
    }
}

impl GestureOptions {
    /// Reject thresholds outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::InvalidThreshold`].
    pub fn validate(&self) -> Result<(), RigError> {
        if (0.0..=1.0).contains(&self.pinch_threshold) {
            Ok(())
        } else {
            Err(RigError::InvalidThreshold(self.pinch_threshold))
        }
    }
}
