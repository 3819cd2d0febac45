//! Bevy input -> village `InputEvent`s
//!
//! Events are forwarded in arrival order, with key names in the same form
//! a browser reports them (`"w"`, `"ArrowUp"`, `"Shift"`). A touch that
//! lands on the joystick pad also drives the virtual joystick.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

use portfolio::village::{DirectionFlags, InputEvent, TouchPoint, VirtualJoystick};

use super::{DayNight, SceneInput, ToggleView, Village, JOYSTICK_SIZE, PAD_MARGIN};

/// Feed this frame's keyboard, mouse and touch events into the village.
pub fn capture_input(
    mut village: ResMut<Village>,
    mut input: ResMut<SceneInput>,
    mut keys: EventReader<KeyboardInput>,
    mut buttons: EventReader<MouseButtonInput>,
    mut cursor_moves: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    mut touch_events: EventReader<TouchInput>,
    touches: Res<Touches>,
    windows: Query<&Window>,
) {
    let mut events = Vec::new();

    for key in keys.read() {
        if key.repeat {
            continue;
        }
        let name = key_name(&key.logical_key);
        events.push(match key.state {
            ButtonState::Pressed => InputEvent::KeyDown(name),
            ButtonState::Released => InputEvent::KeyUp(name),
        });
    }

    for press in buttons.read() {
        let button = button_index(press.button);
        match press.state {
            ButtonState::Pressed => {
                let (x, y) = windows
                    .get(press.window)
                    .ok()
                    .and_then(Window::cursor_position)
                    .map_or((0.0, 0.0), |p| (p.x, p.y));
                events.push(InputEvent::MouseDown { button, x, y });
            }
            ButtonState::Released => events.push(InputEvent::MouseUp { button }),
        }
    }

    for moved in cursor_moves.read() {
        events.push(InputEvent::MouseMove { x: moved.position.x, y: moved.position.y });
    }

    // Releasing outside the window never reaches us as a button event
    if cursor_left.read().next().is_some() {
        events.push(InputEvent::GlobalMouseUp);
    }

    if !touch_events.is_empty() {
        let active: Vec<TouchPoint> = touches
            .iter()
            .map(|t| TouchPoint::new(t.id(), t.position().x, t.position().y))
            .collect();
        let pad = windows.get_single().ok().map(|w| joystick_pad(w.height()));
        for touch in touch_events.read() {
            let point = TouchPoint::new(touch.id, touch.position.x, touch.position.y);
            if let Some(pad) = pad {
                if let Some(flags) = route_touch(&mut village.joystick, pad, touch.phase, point, &active) {
                    events.push(InputEvent::Directions(flags));
                }
            }

            let touches = active.clone();
            events.push(match touch.phase {
                TouchPhase::Started => InputEvent::TouchStart { touches },
                TouchPhase::Moved => InputEvent::TouchMove { touches },
                TouchPhase::Ended => InputEvent::TouchEnd { touches },
                TouchPhase::Canceled => InputEvent::TouchCancel { touches },
            });
        }
    }

    for event in events {
        if let Some(changed) = input.apply(event) {
            debug!(dragging = changed.0, "Drag state changed");
        }
    }
}

/// Scene-level hotkeys: `N` day/night, `V` 2D/3D.
pub fn hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut day_night: ResMut<DayNight>,
    mut toggles: EventWriter<ToggleView>,
) {
    if keyboard.just_pressed(KeyCode::KeyN) {
        day_night.toggle();
    }
    if keyboard.just_pressed(KeyCode::KeyV) {
        toggles.send(ToggleView);
    }
}

/// Screen rectangle of the joystick pad, bottom-left of the window.
pub fn joystick_pad(window_height: f32) -> Rect {
    let top = window_height - PAD_MARGIN - JOYSTICK_SIZE;
    Rect::new(PAD_MARGIN, top, PAD_MARGIN + JOYSTICK_SIZE, top + JOYSTICK_SIZE)
}

/// Hand one touch event to the joystick. A touch starts the joystick only
/// when it lands on the pad; after that the owning touch is followed
/// anywhere on screen. Returns the new flags when the joystick responded.
fn route_touch(
    joystick: &mut VirtualJoystick,
    pad: Rect,
    phase: TouchPhase,
    touch: TouchPoint,
    active: &[TouchPoint],
) -> Option<DirectionFlags> {
    let local = |t: TouchPoint| TouchPoint::new(t.id, t.x - pad.min.x, t.y - pad.min.y);

    match phase {
        TouchPhase::Started if pad.contains(Vec2::new(touch.x, touch.y)) => {
            joystick.touch_start(local(touch))
        }
        TouchPhase::Started => None,
        TouchPhase::Moved => joystick.touch_move(&[local(touch)]),
        TouchPhase::Ended | TouchPhase::Canceled => {
            let remaining: Vec<TouchPoint> = active
                .iter()
                .copied()
                .filter(|t| t.id != touch.id)
                .collect();
            joystick.touch_end(&remaining)
        }
    }
}

fn key_name(key: &Key) -> String {
    match key {
        Key::Character(c) => c.to_string(),
        Key::Space => " ".to_string(),
        other => format!("{other:?}"),
    }
}

fn button_index(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => n.min(u8::MAX as u16) as u8,
    }
}
