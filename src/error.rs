//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbit-rig crate.
///
/// Every variant except [`RigError::Io`] and [`RigError::OptionsParse`] is
/// a configuration-validation failure: the rig rejects bad settings once at
/// setup time and never fails while ticking.
#[derive(Debug)]
pub enum RigError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options or script parsing/serialization failure.
    OptionsParse(String),
    /// Zoom range is empty, inverted, or does not start above zero.
    InvalidZoomRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// Pitch range is empty or inverted.
    InvalidPitchRange {
        /// Configured lower bound in degrees.
        min: f32,
        /// Configured upper bound in degrees.
        max: f32,
    },
    /// Viewport with a zero or non-finite dimension (aspect ratio of zero).
    InvalidViewport {
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
    },
    /// Near/far clip planes that do not satisfy `0 < near < far`.
    InvalidClipPlanes {
        /// Near plane distance.
        near: f32,
        /// Far plane distance.
        far: f32,
    },
    /// Pinch detection threshold outside `[0, 1]`.
    InvalidThreshold(f32),
    /// Resistance curve that cannot be evaluated meaningfully.
    DegenerateCurve(String),
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidZoomRange { min, max } => write!(
                f,
                "invalid zoom range [{min}, {max}]: need 0 < min < max"
            ),
            Self::InvalidPitchRange { min, max } => {
                write!(f, "invalid pitch range [{min}, {max}]: need min < max")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}")
            }
            Self::InvalidClipPlanes { near, far } => write!(
                f,
                "invalid clip planes near={near} far={far}: need 0 < near < far"
            ),
            Self::InvalidThreshold(t) => {
                write!(f, "pinch threshold {t} outside [0, 1]")
            }
            Self::DegenerateCurve(msg) => {
                write!(f, "degenerate resistance curve: {msg}")
            }
        }
    }
}

impl std::error::Error for RigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
