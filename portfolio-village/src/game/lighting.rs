//! Day/night lighting and headlights

use bevy::prelude::*;

use portfolio::village::Theme;

use super::scene::Sun;
use super::{to_bevy, Headlight, Village};

/// Current theme
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct DayNight {
    pub theme: Theme,
}

impl DayNight {
    /// Flip between day and night.
    pub fn toggle(&mut self) {
        self.theme = self.theme.toggled();
        info!("Switched to {:?}", self.theme);
    }

    pub fn is_night(&self) -> bool {
        self.theme == Theme::Night
    }
}

/// Sky, ambient, sun and headlight visibility for the current theme.
pub fn apply_day_night(
    day_night: Res<DayNight>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
    mut suns: Query<&mut DirectionalLight, With<Sun>>,
    mut headlights: Query<&mut Visibility, With<Headlight>>,
) {
    if !day_night.is_changed() {
        return;
    }

    let night = day_night.is_night();
    clear_color.0 = if night {
        Color::srgb(0.02, 0.02, 0.08)
    } else {
        Color::srgb(0.53, 0.81, 0.92)
    };
    ambient.brightness = if night { 60.0 } else { 400.0 };
    for mut sun in suns.iter_mut() {
        sun.illuminance = if night { 400.0 } else { 10_000.0 };
    }
    for mut visibility in headlights.iter_mut() {
        *visibility = if night { Visibility::Inherited } else { Visibility::Hidden };
    }
}

/// Point the headlights ahead of the player.
pub fn aim_headlights(
    village: Res<Village>,
    day_night: Res<DayNight>,
    mut headlights: Query<(&Headlight, &mut Transform)>,
) {
    if !day_night.is_night() {
        return;
    }

    let snapshot = village.controller.state();
    let targets = village.rig.headlight_targets(&snapshot);
    let origin = to_bevy(snapshot.position) + Vec3::Y;

    for (light, mut transform) in headlights.iter_mut() {
        let Some(target) = targets.get(light.index) else {
            continue;
        };
        *transform = Transform::from_translation(origin).looking_at(to_bevy(*target), Vec3::Y);
    }
}
