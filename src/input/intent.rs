use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera movement a gesture maps to.
///
/// Serde serializes as `snake_case` strings so bind tables in TOML presets
/// stay readable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// No camera motion.
    #[default]
    None,
    /// Orbit the pivot (yaw/pitch).
    PanSpherical,
    /// Slide the pivot in the camera's screen plane.
    PanOrthogonal,
    /// Free-look: swing the pivot around the camera position.
    LookAround,
    /// Change the zoom distance level.
    Zoom,
}

/// One frame's classified movement and its 2D delta.
///
/// Zoom intents carry their magnitude in `delta.y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// What to do.
    pub movement: Movement,
    /// How much, in (optionally normalised) pixels.
    pub delta: Vec2,
}

impl MovementIntent {
    /// No movement.
    pub const NONE: Self = Self {
        movement: Movement::None,
        delta: Vec2::ZERO,
    };

    /// Intent from parts.
    #[must_use]
    pub const fn new(movement: Movement, delta: Vec2) -> Self {
        Self { movement, delta }
    }

    /// Zoom intent with magnitude `amount`.
    #[must_use]
    pub const fn zoom(amount: f32) -> Self {
        Self::new(Movement::Zoom, Vec2::new(0.0, amount))
    }

    /// Whether this intent leaves the camera untouched.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.movement == Movement::None
    }

    /// Same movement with the delta multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.movement, self.delta * factor)
    }
}
