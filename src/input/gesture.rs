//! Turns one frame of raw pointer state into a single [`MovementIntent`].
//!
//! The classifier owns the only cross-frame input state: the two-finger
//! pinch baseline (each finger's start position plus its accumulated delta).
//! Everything else is derived from the current [`PointerSample`].

use glam::Vec2;

use super::event::{
    MouseButton, MouseState, PointerSample, TouchPhase, TouchPoint, Viewport,
};
use super::intent::{Movement, MovementIntent};
use crate::options::{
    AmbiguityPolicy, DeltaNormalization, GestureOptions, MouseBindings,
};

/// Mouse buttons in the order they win when several are held.
const BUTTON_PRIORITY: [MouseButton; 3] =
    [MouseButton::Middle, MouseButton::Right, MouseButton::Left];

/// Two-finger gesture baseline captured when the pinch started.
///
/// Distances are measured between `start + accumulated` positions rather
/// than the raw reported positions, which re-sample every frame and jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchBaseline {
    ids: [u64; 2],
    starts: [Vec2; 2],
    accumulated: [Vec2; 2],
}

impl PinchBaseline {
    fn new(a: &TouchPoint, b: &TouchPoint) -> Self {
        Self {
            ids: [a.id, b.id],
            starts: [a.position, b.position],
            accumulated: [Vec2::ZERO; 2],
        }
    }

    fn tracks(&self, a: &TouchPoint, b: &TouchPoint) -> bool {
        self.ids == [a.id, b.id]
    }

    /// Vector between the fingers when the gesture started.
    fn start_span(&self) -> Vec2 {
        self.starts[0] - self.starts[1]
    }

    /// Vector between the fingers now.
    fn current_span(&self) -> Vec2 {
        (self.starts[0] + self.accumulated[0])
            - (self.starts[1] + self.accumulated[1])
    }
}

/// Per-frame gesture classifier.
///
/// # Usage
///
/// ```ignore
/// let intent = classifier.classify(&sample);
/// rig.apply(intent);
/// ```
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    options: GestureOptions,
    bindings: MouseBindings,
    viewport: Viewport,
    pinch: Option<PinchBaseline>,
    /// Last unambiguous two-finger movement, for
    /// [`AmbiguityPolicy::HoldLast`].
    held_two_finger: Movement,
    /// Movement reported last frame, for change logging.
    last_movement: Movement,
}

impl GestureClassifier {
    /// Create a classifier for a screen of the given size.
    #[must_use]
    pub fn new(
        options: GestureOptions,
        bindings: MouseBindings,
        viewport: Viewport,
    ) -> Self {
        Self {
            options,
            bindings,
            viewport,
            pinch: None,
            held_two_finger: Movement::None,
            last_movement: Movement::None,
        }
    }

    /// Gesture options in use.
    #[must_use]
    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// Mouse bind table in use.
    #[must_use]
    pub fn bindings(&self) -> &MouseBindings {
        &self.bindings
    }

    /// Replace the mouse bind table.
    pub fn set_bindings(&mut self, bindings: MouseBindings) {
        self.bindings = bindings;
    }

    /// Screen rectangle in use.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the screen rectangle used for the outside-viewport guard and
    /// DPI normalisation. Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if let Err(e) = viewport.validate() {
            log::warn!("classifier keeps its viewport: {e}");
            return;
        }
        self.viewport = viewport;
    }

    /// Forget the pinch baseline and any held two-finger mode.
    pub fn reset(&mut self) {
        self.pinch = None;
        self.held_two_finger = Movement::None;
    }

    /// Classify one frame of input.
    ///
    /// Always produces exactly one intent; absent or ambiguous input yields
    /// [`Movement::None`].
    pub fn classify(&mut self, sample: &PointerSample) -> MovementIntent {
        self.track_pinch(&sample.touches);
        let intent = self.classify_frame(sample);

        if intent.movement != self.last_movement {
            log::debug!(
                "gesture {:?} -> {:?} ({} touches)",
                self.last_movement,
                intent.movement,
                sample.touches.len()
            );
            self.last_movement = intent.movement;
        }
        intent
    }

    fn classify_frame(&mut self, sample: &PointerSample) -> MovementIntent {
        // A pointer outside the window produces huge deltas when it comes
        // back; drop the whole frame.
        if !self.viewport.contains(sample.primary_position()) {
            return MovementIntent::NONE;
        }

        match sample.touches.as_slice() {
            [] => self.classify_mouse(&sample.mouse),
            [touch] => self.classify_one_finger(touch),
            [a, b] => self.classify_two_fingers(a, b),
            [a, b, c] => self.classify_three_fingers([a, b, c]),
            _ => MovementIntent::NONE,
        }
    }

    /// Keep the pinch baseline in step with the current two touches.
    fn track_pinch(&mut self, touches: &[TouchPoint]) {
        let [a, b] = touches else {
            self.pinch = None;
            self.held_two_finger = Movement::None;
            return;
        };

        let restart = a.phase == TouchPhase::Began
            || b.phase == TouchPhase::Began
            || !self.pinch.is_some_and(|p| p.tracks(a, b));

        match &mut self.pinch {
            Some(pinch) if !restart => {
                pinch.accumulated[0] += a.delta;
                pinch.accumulated[1] += b.delta;
            }
            _ => {
                self.pinch = Some(PinchBaseline::new(a, b));
                self.held_two_finger = Movement::None;
            }
        }
    }

    fn classify_one_finger(&self, touch: &TouchPoint) -> MovementIntent {
        if touch.phase == TouchPhase::Moved {
            MovementIntent::new(
                Movement::PanSpherical,
                self.normalize(touch.delta),
            )
        } else {
            MovementIntent::NONE
        }
    }

    fn classify_two_fingers(
        &mut self,
        a: &TouchPoint,
        b: &TouchPoint,
    ) -> MovementIntent {
        let dot =
            a.delta.normalize_or_zero().dot(b.delta.normalize_or_zero());
        let threshold = self.options.pinch_threshold;

        let movement = if dot > threshold {
            Movement::PanOrthogonal
        } else if dot < -threshold {
            Movement::Zoom
        } else {
            match self.options.ambiguity {
                AmbiguityPolicy::Reset => Movement::None,
                AmbiguityPolicy::HoldLast => self.held_two_finger,
            }
        };
        self.held_two_finger = movement;

        match movement {
            Movement::PanOrthogonal => MovementIntent::new(
                movement,
                self.normalize((a.delta + b.delta) * 0.5),
            ),
            Movement::Zoom => {
                let Some(pinch) = self.pinch else {
                    return MovementIntent::NONE;
                };
                let start = self.normalize(pinch.start_span()).length();
                let current = self.normalize(pinch.current_span()).length();
                MovementIntent::zoom(current - start)
            }
            _ => MovementIntent::NONE,
        }
    }

    fn classify_three_fingers(
        &self,
        touches: [&TouchPoint; 3],
    ) -> MovementIntent {
        if !touches.iter().any(|t| t.phase == TouchPhase::Moved) {
            return MovementIntent::NONE;
        }
        let sum: Vec2 = touches.iter().map(|t| t.delta).sum();
        MovementIntent::new(
            Movement::PanOrthogonal,
            self.normalize(sum / 3.0),
        )
    }

    fn classify_mouse(&self, mouse: &MouseState) -> MovementIntent {
        if let Some(button) =
            BUTTON_PRIORITY.into_iter().find(|b| mouse.is_pressed(*b))
        {
            // A held button bound to nothing still claims the frame
            return MovementIntent::new(
                self.bindings.lookup(button),
                self.normalize(mouse.delta),
            );
        }
        if mouse.scroll != 0.0 {
            return MovementIntent::zoom(mouse.scroll);
        }
        MovementIntent::NONE
    }

    fn normalize(&self, delta: Vec2) -> Vec2 {
        match self.options.normalization {
            DeltaNormalization::Raw => delta,
            DeltaNormalization::Dpi => {
                delta / self.viewport.size() * self.viewport.dpi
            }
        }
    }
}
