//! Input Capture
//!
//! Keyboard, mouse and touch handling for the village. The host (browser
//! shim, Bevy, a test) translates its native events into [`InputEvent`]s and
//! feeds them to [`InputState::apply`]; the character controller reads the
//! resulting key map and look deltas once per frame.

use std::collections::BTreeMap;
use std::f32::consts::PI;
use serde::{Deserialize, Serialize};

use super::joystick::DirectionFlags;

/// Radians of rotation per pixel of pointer drag.
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Vertical look limit (60 degrees either way).
pub const PITCH_LIMIT: f32 = PI / 3.0;

/// Primary (left) mouse button index.
pub const PRIMARY_BUTTON: u8 = 0;

/// Normalize a key identifier the way the key map stores it.
#[inline]
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// A single active touch point, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Stable identifier for the lifetime of the touch
    pub id: u64,
    /// Screen X
    pub x: f32,
    /// Screen Y
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    pub const fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Raw input events, one per host event dispatch.
///
/// Touch events carry the full list of touches still on the screen, the way
/// the DOM reports `TouchEvent.touches`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key pressed
    KeyDown(String),
    /// Key released
    KeyUp(String),
    /// Mouse button pressed at a screen position
    MouseDown { button: u8, x: f32, y: f32 },
    /// Pointer moved
    MouseMove { x: f32, y: f32 },
    /// Mouse button released over the scene
    MouseUp { button: u8 },
    /// Mouse released anywhere, including outside the canvas
    GlobalMouseUp,
    /// Touch began
    TouchStart { touches: Vec<TouchPoint> },
    /// Touch moved
    TouchMove { touches: Vec<TouchPoint> },
    /// Touch lifted
    TouchEnd { touches: Vec<TouchPoint> },
    /// Touch cancelled by the platform
    TouchCancel { touches: Vec<TouchPoint> },
    /// Synthetic direction keys from the on-screen joystick or D-pad
    Directions(DirectionFlags),
}

/// Change of the dragging flag, returned so the host can toggle its
/// "dragging" body class (suppresses text selection while looking around).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragChanged(pub bool);

/// Live input state for the village.
///
/// Single writer: only [`InputState::apply`] mutates it. The controller
/// drains look deltas with [`InputState::take_yaw_delta`].
#[derive(Clone, Debug, Default)]
pub struct InputState {
    /// Key identifier -> pressed
    keys: BTreeMap<String, bool>,
    /// Primary button (or second touch) is held
    dragging: bool,
    /// Last pointer position seen while dragging
    last_pointer: (f32, f32),
    /// Yaw change accumulated since the last frame
    pending_yaw: f32,
    /// Accumulated vertical look angle, clamped to ±PITCH_LIMIT
    pitch: f32,
}

impl InputState {
    /// Create an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    ///
    /// Returns `Some(DragChanged)` when the dragging flag flipped.
    pub fn apply(&mut self, event: InputEvent) -> Option<DragChanged> {
        let was_dragging = self.dragging;

        match event {
            InputEvent::KeyDown(key) => {
                self.keys.insert(normalize_key(&key), true);
            }
            InputEvent::KeyUp(key) => {
                self.keys.insert(normalize_key(&key), false);
            }
            InputEvent::MouseDown { button, x, y } => {
                if button == PRIMARY_BUTTON {
                    self.dragging = true;
                    self.last_pointer = (x, y);
                }
            }
            InputEvent::MouseMove { x, y } => {
                if self.dragging {
                    self.look(x, y);
                }
            }
            InputEvent::MouseUp { button } => {
                if button == PRIMARY_BUTTON {
                    self.dragging = false;
                }
            }
            InputEvent::GlobalMouseUp => {
                self.dragging = false;
            }
            InputEvent::TouchStart { touches } => {
                // A single touch belongs to the joystick; the second drives look
                if touches.len() == 2 {
                    self.dragging = true;
                    self.last_pointer = (touches[1].x, touches[1].y);
                }
            }
            InputEvent::TouchMove { touches } => {
                if self.dragging && touches.len() >= 2 {
                    let touch = touches[1];
                    self.look(touch.x, touch.y);
                }
            }
            InputEvent::TouchEnd { touches } | InputEvent::TouchCancel { touches } => {
                if touches.len() < 2 {
                    self.dragging = false;
                }
            }
            InputEvent::Directions(flags) => {
                for (key, pressed) in flags.entries() {
                    self.keys.insert(key.to_string(), pressed);
                }
            }
        }

        (self.dragging != was_dragging).then_some(DragChanged(self.dragging))
    }

    /// Translate a pointer move into yaw/pitch changes.
    fn look(&mut self, x: f32, y: f32) {
        let dx = x - self.last_pointer.0;
        let dy = y - self.last_pointer.1;

        self.pending_yaw -= dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.last_pointer = (x, y);
    }

    /// Check if a key is currently held. Unknown keys read as released.
    #[inline]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Check if the look drag is active.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current vertical look angle.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Take the yaw change accumulated since the previous call.
    pub fn take_yaw_delta(&mut self) -> f32 {
        std::mem::take(&mut self.pending_yaw)
    }

    /// Number of keys with a recorded state (pressed or released).
    pub fn tracked_keys(&self) -> usize {
        self.keys.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercased() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown("W".into()));
        assert!(input.is_pressed("w"));

        input.apply(InputEvent::KeyUp("w".into()));
        assert!(!input.is_pressed("w"));
        assert_eq!(input.tracked_keys(), 1);
    }

    #[test]
    fn test_unknown_key_reads_released() {
        let input = InputState::new();
        assert!(!input.is_pressed("q"));
    }

    #[test]
    fn test_missed_keyup_leaves_key_stuck() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown("s".into()));
        // Focus loss: no key-up ever arrives, no blur reset exists
        input.apply(InputEvent::GlobalMouseUp);
        assert!(input.is_pressed("s"));
    }

    #[test]
    fn test_primary_button_drag_reports_changes() {
        let mut input = InputState::new();

        let changed = input.apply(InputEvent::MouseDown { button: 0, x: 10.0, y: 10.0 });
        assert_eq!(changed, Some(DragChanged(true)));
        assert!(input.is_dragging());

        // Already dragging: no change reported
        let changed = input.apply(InputEvent::MouseDown { button: 0, x: 10.0, y: 10.0 });
        assert_eq!(changed, None);

        let changed = input.apply(InputEvent::MouseUp { button: 0 });
        assert_eq!(changed, Some(DragChanged(false)));
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut input = InputState::new();
        assert_eq!(input.apply(InputEvent::MouseDown { button: 2, x: 0.0, y: 0.0 }), None);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_mouse_move_accumulates_yaw_and_pitch() {
        let mut input = InputState::new();
        input.apply(InputEvent::MouseDown { button: 0, x: 100.0, y: 100.0 });
        input.apply(InputEvent::MouseMove { x: 110.0, y: 90.0 });

        let yaw = input.take_yaw_delta();
        assert!((yaw + 10.0 * MOUSE_SENSITIVITY).abs() < 1e-6);
        assert!((input.pitch() - 10.0 * MOUSE_SENSITIVITY).abs() < 1e-6);

        // Drained
        assert_eq!(input.take_yaw_delta(), 0.0);
    }

    #[test]
    fn test_mouse_move_without_drag_is_ignored() {
        let mut input = InputState::new();
        input.apply(InputEvent::MouseMove { x: 500.0, y: 500.0 });
        assert_eq!(input.take_yaw_delta(), 0.0);
        assert_eq!(input.pitch(), 0.0);
    }

    #[test]
    fn test_pitch_clamped_to_sixty_degrees() {
        let mut input = InputState::new();
        input.apply(InputEvent::MouseDown { button: 0, x: 0.0, y: 0.0 });
        input.apply(InputEvent::MouseMove { x: 0.0, y: -10_000.0 });
        assert_eq!(input.pitch(), PITCH_LIMIT);

        input.apply(InputEvent::MouseMove { x: 0.0, y: 10_000.0 });
        assert_eq!(input.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_single_touch_reserved_for_joystick() {
        let mut input = InputState::new();
        let one = vec![TouchPoint::new(1, 50.0, 50.0)];
        assert_eq!(input.apply(InputEvent::TouchStart { touches: one }), None);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_second_touch_drives_look() {
        let mut input = InputState::new();
        let start = vec![TouchPoint::new(1, 50.0, 50.0), TouchPoint::new(2, 300.0, 200.0)];
        assert_eq!(
            input.apply(InputEvent::TouchStart { touches: start }),
            Some(DragChanged(true))
        );

        // First touch moves too, but only the second matters for look
        let moved = vec![TouchPoint::new(1, 80.0, 80.0), TouchPoint::new(2, 280.0, 200.0)];
        input.apply(InputEvent::TouchMove { touches: moved });
        assert!((input.take_yaw_delta() - 20.0 * MOUSE_SENSITIVITY).abs() < 1e-6);

        let remaining = vec![TouchPoint::new(1, 80.0, 80.0)];
        assert_eq!(
            input.apply(InputEvent::TouchEnd { touches: remaining }),
            Some(DragChanged(false))
        );
    }

    #[test]
    fn test_touch_cancel_stops_drag() {
        let mut input = InputState::new();
        let start = vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 0.0, 0.0)];
        input.apply(InputEvent::TouchStart { touches: start });
        input.apply(InputEvent::TouchCancel { touches: Vec::new() });
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_direction_flags_write_key_map() {
        let mut input = InputState::new();
        input.apply(InputEvent::Directions(DirectionFlags { w: true, s: false, a: false, d: true }));
        assert!(input.is_pressed("w"));
        assert!(input.is_pressed("d"));
        assert!(!input.is_pressed("s"));

        input.apply(InputEvent::Directions(DirectionFlags::default()));
        assert!(!input.is_pressed("w"));
        assert!(!input.is_pressed("d"));
    }
}
