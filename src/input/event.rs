use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Lifecycle phase of a touch within the current frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// Finger landed this frame.
    Began,
    /// Finger moved since the last frame.
    Moved,
    /// Finger is down but did not move.
    #[default]
    Stationary,
    /// Finger lifted this frame.
    Ended,
    /// The platform cancelled the touch.
    Canceled,
}

/// One finger's state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Platform finger id, stable while the finger stays down.
    pub id: u64,
    /// Screen position in pixels.
    pub position: Vec2,
    /// Movement since the previous frame in pixels.
    #[serde(default)]
    pub delta: Vec2,
    /// Phase this frame.
    #[serde(default)]
    pub phase: TouchPhase,
}

impl TouchPoint {
    /// Touch that started this frame.
    #[must_use]
    pub fn began(id: u64, position: Vec2) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            phase: TouchPhase::Began,
        }
    }

    /// Touch that moved by `delta` and now sits at `position`.
    #[must_use]
    pub fn moved(id: u64, position: Vec2, delta: Vec2) -> Self {
        Self {
            id,
            position,
            delta,
            phase: TouchPhase::Moved,
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Mouse state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseState {
    /// Cursor position in pixels.
    pub position: Vec2,
    /// Cursor movement since the previous frame in pixels.
    pub delta: Vec2,
    /// Vertical scroll this frame (positive = zoom in).
    pub scroll: f32,
    /// Left button held.
    pub left: bool,
    /// Right button held.
    pub right: bool,
    /// Middle button held.
    pub middle: bool,
}

impl MouseState {
    /// Whether `button` is held.
    #[must_use]
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}

/// Everything the pointer devices reported for one frame.
///
/// Rebuilt by the host every frame; the classifier keeps only the pinch
/// baseline between frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSample {
    /// Active touches, in the platform's order.
    pub touches: Vec<TouchPoint>,
    /// Mouse state; ignored while any touch is active.
    pub mouse: MouseState,
}

impl PointerSample {
    /// Sample with only touches.
    #[must_use]
    pub fn from_touches(touches: Vec<TouchPoint>) -> Self {
        Self {
            touches,
            mouse: MouseState::default(),
        }
    }

    /// Sample with only mouse input.
    #[must_use]
    pub fn from_mouse(mouse: MouseState) -> Self {
        Self {
            touches: Vec::new(),
            mouse,
        }
    }

    /// Position of the primary pointer: the first touch, else the mouse.
    #[must_use]
    pub fn primary_position(&self) -> Vec2 {
        self.touches
            .first()
            .map_or(self.mouse.position, |t| t.position)
    }
}

/// Screen dimensions and density reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Dots per inch; used only for DPI delta normalisation.
    #[serde(default = "default_dpi")]
    pub dpi: f32,
}

fn default_dpi() -> f32 {
    96.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl Viewport {
    /// Viewport at the default 96 DPI.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpi: default_dpi(),
        }
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether `point` lies inside `[0, width] x [0, height]`.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x)
            && (0.0..=self.height).contains(&point.y)
    }

    /// Reject zero, negative or non-finite dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`RigError::InvalidViewport`].
    pub fn validate(&self) -> Result<(), RigError> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if ok {
            Ok(())
        } else {
            Err(RigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Began,
            winit::event::TouchPhase::Moved => Self::Moved,
            winit::event::TouchPhase::Ended => Self::Ended,
            winit::event::TouchPhase::Cancelled => Self::Canceled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_position_prefers_first_touch() {
        let mut sample = PointerSample::from_touches(vec![TouchPoint::began(
            7,
            Vec2::new(10.0, 20.0),
        )]);
        sample.mouse.position = Vec2::new(500.0, 500.0);
        assert_eq!(sample.primary_position(), Vec2::new(10.0, 20.0));
        sample.touches.clear();
        assert_eq!(sample.primary_position(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn viewport_bounds_are_inclusive() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.contains(Vec2::ZERO));
        assert!(vp.contains(Vec2::new(800.0, 600.0)));
        assert!(!vp.contains(Vec2::new(-0.5, 10.0)));
        assert!(!vp.contains(Vec2::new(10.0, 600.5)));
    }

    #[test]
    fn zero_height_viewport_is_invalid() {
        assert!(Viewport::new(800.0, 0.0).validate().is_err());
        assert!(Viewport::new(800.0, 600.0).validate().is_ok());
    }

    #[test]
    fn is_pressed_reads_button_flags() {
        let mouse = MouseState {
            middle: true,
            ..MouseState::default()
        };
        assert!(mouse.is_pressed(MouseButton::Middle));
        assert!(!mouse.is_pressed(MouseButton::Left));
    }

    #[test]
    fn touch_sample_parses_from_toml() {
        let sample: PointerSample = toml::from_str(
            r#"
[[touches]]
id = 1
position = [100.0, 200.0]
delta = [5.0, 0.0]
phase = "moved"
"#,
        )
        .unwrap();
        assert_eq!(sample.touches.len(), 1);
        assert_eq!(sample.touches[0].phase, TouchPhase::Moved);
        assert_eq!(sample.touches[0].delta, Vec2::new(5.0, 0.0));
    }
}
