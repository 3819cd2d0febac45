//! Game module - the walkable village
//!
//! Owns the simulation resources and drives them once per frame:
//! input -> scene gate -> controller -> camera and lights.
//!
//! Input state only exists while the 3D scene is active: it is created on
//! entry and dropped on exit, so nothing captured over the loading screen or
//! the 2D cards reaches the controller.

use bevy::prelude::*;

use portfolio::village::{
    CameraRig, CharacterController, ColliderRegistry, ControllerConfig, InputState,
    SceneGate, VillageEvent, VirtualJoystick,
};

use crate::AppState;

pub mod scene;
pub mod input;
pub mod player;
pub mod lighting;

pub use scene::{VillageRoot, PlayerAvatar, PlayerCamera, Headlight};
pub use lighting::DayNight;

/// Size of the on-screen D-pad, in pixels.
pub const DPAD_SIZE: f32 = 120.0;

/// Size of the touch joystick pad, in pixels.
pub const JOYSTICK_SIZE: f32 = 128.0;

/// Gap between the touch controls and the window edge.
pub const PAD_MARGIN: f32 = 24.0;

// ============================================================================
// RESOURCES
// ============================================================================

/// Simulation state shared by every village system.
#[derive(Resource)]
pub struct Village {
    pub controller: CharacterController,
    pub colliders: ColliderRegistry,
    pub rig: CameraRig,
    pub gate: SceneGate,
    pub joystick: VirtualJoystick,
}

impl Default for Village {
    fn default() -> Self {
        Self {
            controller: CharacterController::new(ControllerConfig::default()),
            // Filled when loading succeeds; probing fails open until then
            colliders: ColliderRegistry::new(),
            rig: CameraRig::default(),
            gate: SceneGate::default(),
            joystick: VirtualJoystick::new(JOYSTICK_SIZE, JOYSTICK_SIZE),
        }
    }
}

/// Keys, drag and look accumulators for the live scene.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct SceneInput(pub InputState);

// ============================================================================
// EVENTS
// ============================================================================

/// Location and scene-mode changes, forwarded to the UI
#[derive(Event, Debug, Clone)]
pub struct VillageNotice(pub VillageEvent);

/// Request to switch between the 3D scene and the 2D cards
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleView;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct VillagePlugin;

impl Plugin for VillagePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<Village>()
            .init_resource::<DayNight>()

            // Events
            .add_event::<VillageNotice>()
            .add_event::<ToggleView>()

            // Scene setup
            .add_systems(Startup, scene::spawn_village)

            // Input and scene gate run in every state
            .add_systems(Update, (
                input::capture_input.run_if(in_state(AppState::SceneActive)),
                input::hotkeys,
                advance_gate,
                sync_app_state,
            ).chain())

            // Walking
            .add_systems(Update, (
                player::drive_player,
                lighting::aim_headlights,
            ).chain().after(sync_app_state).run_if(in_state(AppState::SceneActive)))

            .add_systems(Update, lighting::apply_day_night)

            // Hide the 3D world behind the 2D cards
            .add_systems(OnEnter(AppState::SceneActive), (acquire_input, show_village))
            .add_systems(OnExit(AppState::SceneActive), release_input)
            .add_systems(OnEnter(AppState::FallbackActive), hide_village);
    }
}

// ============================================================================
// SCENE GATE
// ============================================================================

/// Finish loading once the scene is spawned and the loading screen has
/// run its minimum time, enforce the load timeout, and apply view toggles.
fn advance_gate(
    time: Res<Time>,
    mut village: ResMut<Village>,
    mut toggles: EventReader<ToggleView>,
    mut notices: EventWriter<VillageNotice>,
    root: Query<(), With<VillageRoot>>,
) {
    let now = time.elapsed_secs();
    let village = &mut *village;

    for _ in toggles.read() {
        if let Some(event) = village.gate.toggle_view(now) {
            notices.send(VillageNotice(event));
        }
    }

    if let Some(event) = village.gate.tick(now) {
        notices.send(VillageNotice(event));
        return;
    }

    if root.is_empty() {
        return;
    }

    if let Some(event) = village.gate.scene_ready(now) {
        if village.colliders.is_empty() {
            village.colliders = ColliderRegistry::village();
            info!("Registered {} colliders", village.colliders.len());
        }
        notices.send(VillageNotice(event));
    }
}

/// Keep the Bevy state in step with the gate.
fn sync_app_state(
    village: Res<Village>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let wanted = AppState::from(village.gate.mode());
    if *state.get() != wanted {
        next_state.set(wanted);
    }
}

fn acquire_input(mut commands: Commands) {
    commands.insert_resource(SceneInput::default());
}

fn release_input(mut commands: Commands) {
    commands.remove_resource::<SceneInput>();
}

fn show_village(mut roots: Query<&mut Visibility, With<VillageRoot>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

fn hide_village(mut roots: Query<&mut Visibility, With<VillageRoot>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// Convert a simulation vector to a Bevy one.
pub fn to_bevy(v: portfolio::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}
