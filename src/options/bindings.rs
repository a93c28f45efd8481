use serde::{Deserialize, Serialize};

use crate::input::{Movement, MouseButton};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Mouse bind table: which movement each held button drives.
///
/// ```toml
/// [bindings]
/// left = "pan_spherical"
/// right = "pan_orthogonal"
/// middle = "look_around"
/// ```
pub struct MouseBindings {
    /// Movement while the left button is held.
    pub left: Movement,
    /// Movement while the right button is held.
    pub right: Movement,
    /// Movement while the middle button is held.
    pub middle: Movement,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            left: Movement::PanSpherical,
            right: Movement::PanOrthogonal,
            middle: Movement::LookAround,
        }
    }
}

impl MouseBindings {
    /// Movement bound to `button`.
    #[must_use]
    pub fn lookup(&self, button: MouseButton) -> Movement {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}
