//! Character Controller
//!
//! Per-frame movement for the village avatar. Reads the key map and look
//! accumulators from [`InputState`], moves the player with collision
//! sliding, and reports location zone transitions.
//!
//! Frame order:
//! 1. Apply pending mouse/touch yaw and the current pitch
//! 2. Sum direction keys into a local move vector
//! 3. Proximity check (moving frames only, throttled, pre-move position)
//! 4. Rotate the move vector by yaw, probe, slide along an axis if blocked
//! 5. Apply keyboard turning
//! 6. Publish the snapshot to listeners

use tracing::debug;

use crate::core::Vec3;
use super::collision::ColliderRegistry;
use super::events::VillageEvent;
use super::input::InputState;
use super::layout::{LocationZone, LOCATION_ZONES, SPAWN_POSITION, WORLD_HALF_EXTENT};

/// Player pose, owned by the controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlayerState {
    /// World position (y fixed at ground height)
    pub position: Vec3,
    /// Yaw in radians
    pub rotation_y: f32,
    /// Pitch in radians, within ±60°
    pub vertical_look_angle: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: SPAWN_POSITION,
            rotation_y: 0.0,
            vertical_look_angle: 0.0,
        }
    }
}

/// Read-only copy of the player pose handed to listeners.
pub type PlayerSnapshot = PlayerState;

/// Listener for per-frame pose updates.
pub type PositionListener = Box<dyn FnMut(&PlayerSnapshot) + Send + Sync>;

/// Listener for location enter/exit events.
pub type LocationListener = Box<dyn FnMut(&VillageEvent) + Send + Sync>;

/// Controller tuning.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Distance per frame per engaged axis
    pub speed: f32,
    /// Yaw change per frame while turning with A/D
    pub turn_rate: f32,
    /// Minimum seconds between proximity checks
    pub proximity_interval: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            turn_rate: 0.08,
            proximity_interval: 0.5,
        }
    }
}

/// Result of one frame.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Pose after the frame
    pub snapshot: PlayerSnapshot,
    /// Any direction key was engaged
    pub moving: bool,
    /// Full candidate was rejected (a slide may still have happened)
    pub blocked: bool,
    /// Location events generated this frame
    pub events: Vec<VillageEvent>,
}

/// Drives the player from input.
pub struct CharacterController {
    config: ControllerConfig,
    state: PlayerState,
    zones: Vec<LocationZone>,
    last_check: f32,
    last_location: Option<&'static str>,
    position_listeners: Vec<PositionListener>,
    location_listeners: Vec<LocationListener>,
}

impl CharacterController {
    /// Create a controller at the spawn point with the village zones.
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_zones(config, LOCATION_ZONES.to_vec())
    }

    /// Create a controller with a custom zone list.
    pub fn with_zones(config: ControllerConfig, zones: Vec<LocationZone>) -> Self {
        Self {
            config,
            state: PlayerState::default(),
            zones,
            last_check: 0.0,
            last_location: None,
            position_listeners: Vec::new(),
            location_listeners: Vec::new(),
        }
    }

    /// Current pose.
    pub fn state(&self) -> PlayerSnapshot {
        self.state
    }

    /// Overwrite the pose (respawn, tests).
    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    /// Zone the player last entered.
    pub fn current_location(&self) -> Option<&'static str> {
        self.last_location
    }

    /// Register a pose listener, called once per frame.
    pub fn on_position_update(&mut self, listener: PositionListener) {
        self.position_listeners.push(listener);
    }

    /// Register a location listener, called for every enter/exit event.
    pub fn on_location_event(&mut self, listener: LocationListener) {
        self.location_listeners.push(listener);
    }

    /// Run one frame.
    ///
    /// `elapsed` is seconds since the scene started.
    pub fn update(
        &mut self,
        input: &mut InputState,
        colliders: &ColliderRegistry,
        elapsed: f32,
    ) -> FrameResult {
        let mut result = FrameResult::default();

        // 1. Look
        self.state.rotation_y += input.take_yaw_delta();
        self.state.vertical_look_angle = input.pitch();

        // 2. Keys
        let speed = self.config.speed;
        let mut move_x = 0.0;
        let mut move_z = 0.0;
        let mut turn = 0.0;

        // W steps backward and S forward
        if input.is_pressed("w") {
            move_z += speed;
        }
        if input.is_pressed("s") {
            move_z -= speed;
        }
        if input.is_pressed("a") {
            move_x -= speed;
            if !input.is_dragging() {
                turn = self.config.turn_rate;
            }
        }
        if input.is_pressed("d") {
            move_x += speed;
            // D overrides A when both are held
            if !input.is_dragging() {
                turn = -self.config.turn_rate;
            }
        }

        result.moving = move_x != 0.0 || move_z != 0.0;

        if result.moving {
            // 3. Proximity
            if elapsed - self.last_check > self.config.proximity_interval {
                self.last_check = elapsed;
                self.check_proximity(elapsed, &mut result);
            }

            // 4. Move
            result.blocked = !self.try_move(move_x, move_z, colliders);
        }

        // 5. Keyboard turn
        self.state.rotation_y += turn;

        // 6. Publish
        result.snapshot = self.state;
        for listener in &mut self.position_listeners {
            listener(&result.snapshot);
        }
        for event in &result.events {
            for listener in &mut self.location_listeners {
                listener(event);
            }
        }

        result
    }

    fn check_proximity(&mut self, elapsed: f32, result: &mut FrameResult) {
        let position = self.state.position;

        for zone in &self.zones {
            let distance = position.planar_distance(zone.x, zone.z);

            if distance < zone.radius && self.last_location != Some(zone.id) {
                debug!(zone = zone.id, "Entered location");
                self.last_location = Some(zone.id);
                result.events.push(VillageEvent::location_entered(elapsed, zone.id));
            } else if distance >= zone.radius && self.last_location == Some(zone.id) {
                debug!(zone = zone.id, "Left location");
                self.last_location = None;
                result.events.push(VillageEvent::location_exited(elapsed, zone.id));
            }
        }
    }

    /// Move by the local vector. Returns false when the full candidate was
    /// rejected.
    fn try_move(&mut self, move_x: f32, move_z: f32, colliders: &ColliderRegistry) -> bool {
        let Vec3 { x, y, z } = self.state.position;
        let (sin, cos) = self.state.rotation_y.sin_cos();

        let new_x = x + sin * move_z + cos * move_x;
        let new_z = z + cos * move_z - sin * move_x;

        let free = |candidate: Vec3| in_bounds(candidate) && !colliders.probe(candidate);

        let full = Vec3::new(new_x, y, new_z);
        if free(full) {
            self.state.position = full;
            return true;
        }

        // Slide along whichever axis is still open
        let x_only = Vec3::new(new_x, y, z);
        let z_only = Vec3::new(x, y, new_z);
        if free(x_only) {
            self.state.position = x_only;
        } else if free(z_only) {
            self.state.position = z_only;
        }
        false
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl std::fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterController")
            .field("state", &self.state)
            .field("last_location", &self.last_location)
            .field("position_listeners", &self.position_listeners.len())
            .field("location_listeners", &self.location_listeners.len())
            .finish()
    }
}

#[inline]
fn in_bounds(position: Vec3) -> bool {
    position.x.abs() <= WORLD_HALF_EXTENT && position.z.abs() <= WORLD_HALF_EXTENT
}

// =============================================================================
// TESTS
// =============================================================================
