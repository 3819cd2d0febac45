//! Virtual Joystick
//!
//! On-screen joystick and D-pad for touch devices. Knob displacement is
//! turned into the same W/A/S/D flags the keyboard produces, so the
//! controller never knows which device moved it.

use serde::{Deserialize, Serialize};

use super::input::TouchPoint;

/// Fraction of the knob's travel needed before a direction engages.
pub const DEAD_ZONE: f32 = 0.3;

/// Direction keys derived from the joystick or D-pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionFlags {
    /// Up on the pad
    pub w: bool,
    /// Down on the pad
    pub s: bool,
    /// Left on the pad
    pub a: bool,
    /// Right on the pad
    pub d: bool,
}

impl DirectionFlags {
    /// Key identifiers paired with their state, in key-map form.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [("w", self.w), ("s", self.s), ("a", self.a), ("d", self.d)]
    }

    /// Check if any direction is engaged.
    pub fn any(&self) -> bool {
        self.w || self.s || self.a || self.d
    }
}

/// Joystick pad state.
///
/// Coordinates passed in are relative to the pad's top-left corner.
#[derive(Clone, Debug)]
pub struct VirtualJoystick {
    center: (f32, f32),
    max_distance: f32,
    /// Touch that owns the joystick
    active_touch: Option<u64>,
    /// Knob offset from center, clamped to `max_distance`
    knob: (f32, f32),
    directions: DirectionFlags,
}

impl VirtualJoystick {
    /// Create a joystick for a pad of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: (width / 2.0, height / 2.0),
            max_distance: width / 3.0,
            active_touch: None,
            knob: (0.0, 0.0),
            directions: DirectionFlags::default(),
        }
    }

    /// Check if a touch currently owns the joystick.
    pub fn is_active(&self) -> bool {
        self.active_touch.is_some()
    }

    /// Knob offset from the pad center.
    pub fn knob(&self) -> (f32, f32) {
        self.knob
    }

    /// Current direction flags.
    pub fn directions(&self) -> DirectionFlags {
        self.directions
    }

    /// A touch landed on the pad. Ignored if another touch already owns it.
    pub fn touch_start(&mut self, touch: TouchPoint) -> Option<DirectionFlags> {
        if self.active_touch.is_some() {
            return None;
        }

        self.active_touch = Some(touch.id);
        Some(self.update_knob(touch.x, touch.y))
    }

    /// Touches moved. Only the owning touch is followed.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<DirectionFlags> {
        let id = self.active_touch?;
        let touch = touches.iter().find(|t| t.id == id)?;
        Some(self.update_knob(touch.x, touch.y))
    }

    /// Touches ended; `remaining` lists those still down. Resets when the
    /// owning touch is gone.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> Option<DirectionFlags> {
        let id = self.active_touch?;
        if remaining.iter().any(|t| t.id == id) {
            return None;
        }
        Some(self.reset())
    }

    /// D-pad button press or release for a single direction.
    pub fn press(&mut self, key: &str, pressed: bool) -> DirectionFlags {
        match key {
            "w" => self.directions.w = pressed,
            "s" => self.directions.s = pressed,
            "a" => self.directions.a = pressed,
            "d" => self.directions.d = pressed,
            _ => {}
        }
        self.directions
    }

    /// Release the joystick and clear every direction.
    pub fn reset(&mut self) -> DirectionFlags {
        self.active_touch = None;
        self.knob = (0.0, 0.0);
        self.directions = DirectionFlags::default();
        self.directions
    }

    fn update_knob(&mut self, x: f32, y: f32) -> DirectionFlags {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        let distance = (dx * dx + dy * dy).sqrt();

        self.knob = if distance > self.max_distance {
            let angle = dy.atan2(dx);
            (angle.cos() * self.max_distance, angle.sin() * self.max_distance)
        } else {
            (dx, dy)
        };

        let threshold = self.max_distance * DEAD_ZONE;
        self.directions = DirectionFlags {
            w: self.knob.1 < -threshold,
            s: self.knob.1 > threshold,
            a: self.knob.0 < -threshold,
            d: self.knob.0 > threshold,
        };
        self.directions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 128px pad: center (64, 64), max travel ~42.7, dead zone ~12.8
    fn pad() -> VirtualJoystick {
        VirtualJoystick::new(128.0, 128.0)
    }

    #[test]
    fn test_push_up_engages_w() {
        let mut joy = pad();
        let flags = joy.touch_start(TouchPoint::new(7, 64.0, 20.0)).unwrap();
        assert!(flags.w);
        assert!(!flags.s && !flags.a && !flags.d);
    }

    #[test]
    fn test_small_push_stays_in_dead_zone() {
        let mut joy = pad();
        let flags = joy.touch_start(TouchPoint::new(7, 70.0, 58.0)).unwrap();
        assert!(!flags.any());
    }

    #[test]
    fn test_knob_clamped_to_max_distance() {
        let mut joy = pad();
        joy.touch_start(TouchPoint::new(1, 64.0 + 500.0, 64.0));
        let (kx, ky) = joy.knob();
        assert!((kx - 128.0 / 3.0).abs() < 1e-3);
        assert!(ky.abs() < 1e-3);
        assert!(joy.directions().d);
    }

    #[test]
    fn test_second_touch_ignored_while_owned() {
        let mut joy = pad();
        joy.touch_start(TouchPoint::new(1, 64.0, 64.0));
        assert!(joy.touch_start(TouchPoint::new(2, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_move_follows_owning_touch_only() {
        let mut joy = pad();
        joy.touch_start(TouchPoint::new(1, 64.0, 64.0));

        let others = [TouchPoint::new(2, 0.0, 64.0)];
        assert!(joy.touch_move(&others).is_none());

        let mine = [TouchPoint::new(2, 0.0, 64.0), TouchPoint::new(1, 10.0, 64.0)];
        let flags = joy.touch_move(&mine).unwrap();
        assert!(flags.a);
    }

    #[test]
    fn test_lifting_owner_resets() {
        let mut joy = pad();
        joy.touch_start(TouchPoint::new(1, 64.0, 0.0));
        assert!(joy.directions().w);

        // Another finger lifted, owner still down
        assert!(joy.touch_end(&[TouchPoint::new(1, 64.0, 0.0)]).is_none());

        let flags = joy.touch_end(&[]).unwrap();
        assert!(!flags.any());
        assert!(!joy.is_active());
        assert_eq!(joy.knob(), (0.0, 0.0));
    }

    #[test]
    fn test_dpad_press_and_release() {
        let mut joy = pad();
        assert!(joy.press("s", true).s);
        assert!(!joy.press("s", false).s);
        // Unknown keys leave flags untouched
        assert!(!joy.press("x", true).any());
    }
}
