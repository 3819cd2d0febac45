//! Per-frame character and camera update

use bevy::prelude::*;

use portfolio::village::VillageEventData;

use super::{to_bevy, PlayerAvatar, PlayerCamera, SceneInput, Village, VillageNotice};

/// Run the controller once and move the avatar and camera to match.
pub fn drive_player(
    time: Res<Time>,
    mut village: ResMut<Village>,
    mut input: ResMut<SceneInput>,
    mut notices: EventWriter<VillageNotice>,
    mut avatar: Query<&mut Transform, (With<PlayerAvatar>, Without<PlayerCamera>)>,
    mut camera: Query<&mut Transform, (With<PlayerCamera>, Without<PlayerAvatar>)>,
) {
    let village = &mut *village;
    let frame = village.controller.update(
        &mut input.0,
        &village.colliders,
        time.elapsed_secs(),
    );

    for event in frame.events {
        match &event.data {
            VillageEventData::LocationEntered { zone_id } => info!("Entered {}", zone_id),
            VillageEventData::LocationExited { zone_id } => info!("Left {}", zone_id),
            VillageEventData::SceneModeChanged { .. } => {}
        }
        notices.send(VillageNotice(event));
    }

    let snapshot = frame.snapshot;

    if let Ok(mut transform) = avatar.get_single_mut() {
        transform.translation = to_bevy(snapshot.position);
        transform.rotation = Quat::from_rotation_y(snapshot.rotation_y);
    }

    if let Ok(mut transform) = camera.get_single_mut() {
        let pose = village.rig.pose(&snapshot);
        *transform = Transform::from_translation(to_bevy(pose.position))
            .looking_at(to_bevy(pose.look_at), Vec3::Y);
    }
}
