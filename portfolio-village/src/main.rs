//! Konoha Village - 3D portfolio explorer
//!
//! Walk between buildings to read about education, work and projects.
//! Movement, collision, camera and mini-map math come from
//! `portfolio::village`; this binary only renders and forwards input.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowMode;

use portfolio::village::SceneMode;

use game::VillagePlugin;
use ui::UiPlugin;

/// App states, mirrored from the scene gate
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Loading,
    SceneActive,
    FallbackActive,
}

impl From<SceneMode> for AppState {
    fn from(mode: SceneMode) -> Self {
        match mode {
            SceneMode::Loading => AppState::Loading,
            SceneMode::SceneActive => AppState::SceneActive,
            SceneMode::FallbackActive(_) => AppState::FallbackActive,
        }
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Konoha Village".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        .init_state::<AppState>()
        .add_plugins((
            VillagePlugin,
            UiPlugin,
        ))
        .run();
}
