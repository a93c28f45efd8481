//! Input handling: per-frame pointer samples, movement intents, and the
//! gesture classifier that maps one onto the other.

/// Platform-agnostic pointer, touch and viewport types.
pub mod event;
/// Converts pointer samples into movement intents.
pub mod gesture;
/// Movement vocabulary shared with the camera rig.
pub mod intent;

pub use event::{
    MouseButton, MouseState, PointerSample, TouchPhase, TouchPoint, Viewport,
};
pub use gesture::GestureClassifier;
pub use intent::{Movement, MovementIntent};
