use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Projection", inline)]
#[serde(default)]
/// Skewed projection parameters.
pub struct ProjectionOptions {
    /// Skew in percent: 0 is parallel projection, negative is reverse
    /// perspective.
    #[schemars(title = "Perspective", range(min = -100.0, max = 100.0), extend("step" = 1.0))]
    pub perspective: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub far: f32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            perspective: 0.0,
            near: 0.3,
            far: 1000.0,
        }
    }
}

impl ProjectionOptions {
    /// Reject clip planes that do not satisfy `0 < near < far`.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::InvalidClipPlanes`].
    pub fn validate(&self) -> Result<(), RigError> {
        let (near, far) = (self.near, self.far);
        if near.is_finite() && far.is_finite() && near > 0.0 && far > near {
            Ok(())
        } else {
            Err(RigError::InvalidClipPlanes { near, far })
        }
    }
}
